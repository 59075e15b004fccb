//! Wallet session layer for the dual-chain front-end.
//!
//! EVM wallets are handled entirely by the EVM client library; this crate
//! only resolves its startup settings. Solana is different: the injected
//! browser wallet emits no account-change event, so a poller watches it (and
//! the managed adapter's wallet) and publishes one reconciled
//! [`SessionState`] to subscribers.

pub mod config;
pub mod error;
pub mod logging;
pub mod payload;
pub mod poller;
pub mod provider;
pub mod reconciler;
pub mod session;
pub mod source;
pub mod store;
pub mod types;

pub use config::Web3Config;
pub use error::SessionError;
pub use payload::SignPayload;
pub use poller::{Poller, PollerConfig, PollerHandle};
pub use provider::Web3Provider;
pub use reconciler::{ConnectionHook, Reconciler, Transition, WalletOrigin};
pub use session::{SolanaConnection, SolanaSession, WalletAdapter};
pub use source::{NoWallet, SharedWalletSource, WalletSource};
pub use store::SessionStore;
pub use types::{SessionState, TransactionSigner, WalletHandle};
