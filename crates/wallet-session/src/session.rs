//! The Solana session API handed to UI code.
//!
//! [`SolanaSession`] is the context value: the observed state (read through
//! [`SessionState`] or a watch subscription) plus the operations that go
//! through the wallet adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chain_sol::{to_array_string, BlockhashInfo, ConfirmationStrategy, TransferRequest};
use tokio::sync::watch;

use crate::error::SessionError;
use crate::payload::SignPayload;
use crate::poller::{Poller, PollerConfig, PollerHandle};
use crate::reconciler::Reconciler;
use crate::source::WalletSource;
use crate::store::SessionStore;
use crate::types::{SessionState, WalletHandle};

/// The managed wallet library's connected-wallet capabilities.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Not every wallet can sign arbitrary messages.
    fn supports_message_signing(&self) -> bool;

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SessionError>;

    /// Have the wallet build, sign and submit `request`. Returns the
    /// transaction signature.
    async fn send_transaction(
        &self,
        request: &TransferRequest,
        connection: &dyn SolanaConnection,
    ) -> Result<String, SessionError>;

    async fn disconnect(&self) -> Result<(), SessionError>;
}

/// RPC connection to the configured cluster.
#[async_trait]
pub trait SolanaConnection: Send + Sync {
    fn endpoint(&self) -> &str;

    async fn latest_blockhash(&self) -> Result<BlockhashInfo, SessionError>;

    async fn confirm_transaction(
        &self,
        strategy: &ConfirmationStrategy,
    ) -> Result<(), SessionError>;
}

pub struct SolanaSession {
    store: SessionStore,
    adapter: Arc<dyn WalletAdapter>,
    connection: Arc<dyn SolanaConnection>,
    poller: Option<PollerHandle>,
}

impl SolanaSession {
    /// A session without a poller; state only changes through the explicit
    /// operations.
    pub fn new(
        store: SessionStore,
        adapter: Arc<dyn WalletAdapter>,
        connection: Arc<dyn SolanaConnection>,
    ) -> Self {
        Self {
            store,
            adapter,
            connection,
            poller: None,
        }
    }

    /// A session whose state is driven by polling `injected` and `external`.
    /// Must be called inside a tokio runtime.
    pub fn spawn<I, E>(
        adapter: Arc<dyn WalletAdapter>,
        connection: Arc<dyn SolanaConnection>,
        injected: I,
        external: E,
        reconciler: Reconciler,
        config: &PollerConfig,
    ) -> Self
    where
        I: WalletSource + 'static,
        E: WalletSource + 'static,
    {
        let store = SessionStore::new();
        let poller = Poller::new(store.clone(), injected, external, reconciler, config).spawn();
        Self {
            store,
            adapter,
            connection,
            poller: Some(poller),
        }
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub fn initial_address(&self) -> Option<String> {
        self.store.read(|s| s.initial_address().map(str::to_string))
    }

    pub fn wallet(&self) -> Option<WalletHandle> {
        self.store.read(|s| s.wallet().cloned())
    }

    pub fn address(&self) -> Option<String> {
        self.store.read(SessionState::address)
    }

    pub fn is_connected(&self) -> bool {
        self.store.read(SessionState::is_connected)
    }

    pub fn is_disconnected(&self) -> bool {
        self.store.read(SessionState::is_disconnected)
    }

    pub fn set_is_connected(&self, is_connected: bool) {
        self.store.update(|s| s.is_connected = is_connected);
    }

    /// Disconnect through the adapter, then forget the stored wallet. The
    /// initial address is kept.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        self.adapter.disconnect().await?;
        self.store.update(|s| s.wallet = None);
        tracing::info!("Solana wallet disconnected by user");
        Ok(())
    }

    async fn sign(&self, payload: SignPayload<'_>) -> Result<Option<String>, SessionError> {
        if !self.adapter.supports_message_signing() {
            tracing::debug!(verb = payload.verb(), "wallet cannot sign messages");
            return Ok(None);
        }

        let message = payload.to_string();
        let signature = self.adapter.sign_message(message.as_bytes()).await?;
        tracing::debug!(verb = payload.verb(), "message signed");
        Ok(Some(to_array_string(&signature)?))
    }

    pub async fn sign_add_wallet(
        &self,
        main_address: &str,
        input_address: &str,
        timestamp: u64,
    ) -> Result<Option<String>, SessionError> {
        self.sign(SignPayload::AddWallet {
            main_address,
            input_address,
            timestamp,
        })
        .await
    }

    pub async fn sign_new_account(
        &self,
        address: &str,
        account_name: &str,
        timestamp: u64,
    ) -> Result<Option<String>, SessionError> {
        self.sign(SignPayload::NewAccount {
            address,
            account_name,
            timestamp,
        })
        .await
    }

    pub async fn sign_remove_account(
        &self,
        account: &str,
        timestamp: u64,
    ) -> Result<Option<String>, SessionError> {
        self.sign(SignPayload::RemoveAccount { account, timestamp })
            .await
    }

    /// Send the ownership-proof self-transfer for `account` and wait for it
    /// to confirm. Any adapter or RPC failure is returned as is.
    pub async fn send_sign_transaction(&self, account: &str) -> Result<String, SessionError> {
        let request = TransferRequest::self_transfer(account)?;

        let signature = self
            .adapter
            .send_transaction(&request, self.connection.as_ref())
            .await?;
        let latest = self.connection.latest_blockhash().await?;
        self.connection
            .confirm_transaction(&ConfirmationStrategy::new(latest, signature.clone()))
            .await?;

        tracing::info!(
            signature = %signature,
            endpoint = self.connection.endpoint(),
            lamports = request.lamports,
            "Ownership transfer confirmed"
        );
        Ok(signature)
    }

    /// Stop polling. Dropping the session has the same effect without
    /// waiting for the task.
    pub async fn shutdown(mut self) -> Result<(), SessionError> {
        match self.poller.take() {
            Some(poller) => poller.shutdown().await,
            None => Ok(()),
        }
    }
}
