//! Shared session state with change notification.

use std::sync::Arc;

use tokio::sync::watch;

use crate::types::SessionState;

/// Holds the current [`SessionState`] and notifies subscribers when it
/// changes. Clones share the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Read without cloning.
    pub fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutate the state; subscribers are only woken when it actually changed.
    /// Returns whether it did.
    pub fn update(&self, f: impl FnOnce(&mut SessionState)) -> bool {
        self.tx.send_if_modified(|state| {
            let before = state.clone();
            f(state);
            *state != before
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
