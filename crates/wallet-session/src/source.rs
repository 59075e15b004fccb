//! Wallet presence sources.
//!
//! The injected browser wallet has no change event, so the session has to
//! ask. Both the injected global and the managed adapter's wallet sit behind
//! [`WalletSource`], which keeps the reconciliation logic independent of how
//! presence is actually observed.

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::WalletHandle;

/// Something that can be asked, right now, which wallet it holds.
pub trait WalletSource: Send + Sync {
    fn poll(&self) -> Option<WalletHandle>;
}

impl<T: WalletSource + ?Sized> WalletSource for Arc<T> {
    fn poll(&self) -> Option<WalletHandle> {
        (**self).poll()
    }
}

/// A source that never holds a wallet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWallet;

impl WalletSource for NoWallet {
    fn poll(&self) -> Option<WalletHandle> {
        None
    }
}

/// A settable slot. The embedding layer writes whatever the underlying
/// library currently reports; the poller reads it on its own schedule.
#[derive(Debug, Clone, Default)]
pub struct SharedWalletSource {
    slot: Arc<RwLock<Option<WalletHandle>>>,
}

impl SharedWalletSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, wallet: WalletHandle) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(wallet);
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl WalletSource for SharedWalletSource {
    fn poll(&self) -> Option<WalletHandle> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
