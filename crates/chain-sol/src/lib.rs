//! Solana side of the wallet front-end.
//!
//! Cluster and endpoint selection, the wallet adapter set, public keys, and
//! the transfer request used to prove account ownership. Transaction
//! serialization and signing stay with the wallet adapter; nothing here
//! touches private keys.

pub mod adapters;
pub mod address;
pub mod cluster;
pub mod error;
pub mod transfer;

// Re-export key public types for ergonomic imports.
pub use adapters::{default_adapters, WalletAdapterKind, WalletProviderSettings};
pub use address::{address_to_bytes, bytes_to_address, validate_address, Pubkey};
pub use cluster::{cluster_api_url, resolve_endpoint, Cluster};
pub use error::SolError;
pub use transfer::{
    to_array_string, BlockhashInfo, ConfirmationStrategy, TransferRequest, LAMPORTS_PER_SOL,
    SIGN_TRANSFER_LAMPORTS,
};
