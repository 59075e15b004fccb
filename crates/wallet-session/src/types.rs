use std::fmt;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use chain_sol::Pubkey;

use crate::error::SessionError;

/// Transaction signing capabilities exposed by a connected wallet.
///
/// Transactions travel as serialized wire bytes; building and encoding them
/// is the wallet library's business.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_transaction(&self, transaction: Vec<u8>) -> Result<Vec<u8>, SessionError>;

    async fn sign_all_transactions(
        &self,
        transactions: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, SessionError>;
}

/// A connected wallet as seen by the session.
///
/// The handle only holds a weak reference to the signer: whichever source
/// produced the wallet owns it, and once that source lets go, signing through
/// a stale handle fails with [`SessionError::WalletGone`].
#[derive(Clone)]
pub struct WalletHandle {
    public_key: Pubkey,
    signer: Weak<dyn TransactionSigner>,
}

impl WalletHandle {
    pub fn new(public_key: Pubkey, signer: &Arc<dyn TransactionSigner>) -> Self {
        Self {
            public_key,
            signer: Arc::downgrade(signer),
        }
    }

    pub fn public_key(&self) -> Pubkey {
        self.public_key
    }

    /// Base58 address, the identity compared between poll ticks.
    pub fn address(&self) -> String {
        self.public_key.to_base58()
    }

    /// Whether the owning source still holds the signer.
    pub fn is_live(&self) -> bool {
        self.signer.strong_count() > 0
    }

    fn signer(&self) -> Result<Arc<dyn TransactionSigner>, SessionError> {
        self.signer.upgrade().ok_or(SessionError::WalletGone)
    }

    pub async fn sign_transaction(&self, transaction: Vec<u8>) -> Result<Vec<u8>, SessionError> {
        self.signer()?.sign_transaction(transaction).await
    }

    pub async fn sign_all_transactions(
        &self,
        transactions: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, SessionError> {
        self.signer()?.sign_all_transactions(transactions).await
    }
}

/// Handles are equal when they carry the same public key.
impl PartialEq for WalletHandle {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for WalletHandle {}

impl fmt::Debug for WalletHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletHandle")
            .field("public_key", &self.public_key)
            .field("live", &self.is_live())
            .finish()
    }
}

/// What UI consumers observe about the Solana wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) initial_address: Option<String>,
    pub(crate) wallet: Option<WalletHandle>,
    pub(crate) is_connected: bool,
    pub(crate) is_disconnected: bool,
}

impl SessionState {
    /// Address recorded at the first successful connection. Write-once.
    pub fn initial_address(&self) -> Option<&str> {
        self.initial_address.as_deref()
    }

    pub fn wallet(&self) -> Option<&WalletHandle> {
        self.wallet.as_ref()
    }

    pub fn address(&self) -> Option<String> {
        self.wallet.as_ref().map(WalletHandle::address)
    }

    /// One-shot pulse: true only in the snapshot of the tick that recorded
    /// the initial address (or after an explicit `set_is_connected(true)`
    /// until the next tick).
    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    pub fn is_disconnected(&self) -> bool {
        self.is_disconnected
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            initial_address: None,
            wallet: None,
            is_connected: false,
            is_disconnected: true,
        }
    }
}
