use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Wallet adapter error: {0}")]
    Adapter(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Wallet is no longer available")]
    WalletGone,

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<chain_eth::error::EthError> for SessionError {
    fn from(e: chain_eth::error::EthError) -> Self {
        use chain_eth::error::EthError;
        match e {
            EthError::InvalidAddress(msg) => SessionError::InvalidAddress(format!("ETH: {msg}")),
            other => SessionError::Config(format!("ETH: {other}")),
        }
    }
}

impl From<chain_sol::error::SolError> for SessionError {
    fn from(e: chain_sol::error::SolError) -> Self {
        use chain_sol::error::SolError;
        match e {
            SolError::InvalidAddress(msg) => SessionError::InvalidAddress(format!("SOL: {msg}")),
            other @ SolError::UnknownCluster(_) => SessionError::Config(format!("SOL: {other}")),
            other => SessionError::TransactionFailed(format!("SOL: {other}")),
        }
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(e: toml::de::Error) -> Self {
        SessionError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_eth::error::EthError;
    use chain_sol::error::SolError;

    #[test]
    fn eth_address_errors_stay_address_errors() {
        let err: SessionError = EthError::InvalidAddress("bad checksum".into()).into();
        assert_eq!(err.to_string(), "Invalid address: ETH: bad checksum");
    }

    #[test]
    fn eth_chain_errors_are_config_errors() {
        let err: SessionError = EthError::UnsupportedChain(3).into();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn sol_cluster_errors_are_config_errors() {
        let err: SessionError = SolError::UnknownCluster("localnet".into()).into();
        assert_eq!(err.to_string(), "Configuration error: SOL: unknown cluster: localnet");
    }

    #[test]
    fn sol_build_errors_are_transaction_failures() {
        let err: SessionError = SolError::TransactionBuildError("zero".into()).into();
        assert!(matches!(err, SessionError::TransactionFailed(_)));
    }
}
