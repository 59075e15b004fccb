use thiserror::Error;

/// EVM configuration and account errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),

    #[error("no rpc endpoint configured for chain {0}")]
    NoRpcEndpoint(u64),
}
