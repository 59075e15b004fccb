use thiserror::Error;

/// Solana configuration and request errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown cluster: {0}")]
    UnknownCluster(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = SolError::InvalidAddress("bad decode".into());
        assert_eq!(err.to_string(), "invalid address: bad decode");
    }

    #[test]
    fn display_unknown_cluster() {
        let err = SolError::UnknownCluster("localnet".into());
        assert_eq!(err.to_string(), "unknown cluster: localnet");
    }

    #[test]
    fn display_transaction_build_error() {
        let err = SolError::TransactionBuildError("zero lamports".into());
        assert_eq!(err.to_string(), "transaction build error: zero lamports");
    }

    #[test]
    fn debug_format_works() {
        let err = SolError::SerializationError("fail".into());
        let debug = format!("{:?}", err);
        assert!(debug.contains("SerializationError"));
    }
}
