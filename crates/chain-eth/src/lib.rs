//! Ethereum/EVM side of the wallet front-end.
//!
//! This crate provides:
//! - The EVM chain set per deployment environment
//! - RPC provider fallback lists and transport timing
//! - The wallet connector set and client settings
//! - EIP-55 normalization of connector-reported accounts

pub mod address;
pub mod chains;
pub mod connectors;
pub mod error;
pub mod rpc;

pub use address::{checksum_address, normalize_account, validate_address};
pub use chains::{get_chain, supported_chains, AppEnv, EvmChain};
pub use connectors::{default_connectors, ClientSettings, Connector, WalletConnectOptions};
pub use error::EthError;
pub use rpc::{
    configure_chains, default_providers, generate_json_rpc_providers, ChainClientConfig,
    RpcEndpoint, RpcProvider, TransportConfig,
};
