//! Wallet presence polling loop.
//!
//! One task per session. Ticks are synchronous and never overlap; the delay
//! before the next tick is recomputed after every tick from the stored
//! wallet. The task stops on [`PollerHandle::shutdown`] or when the handle
//! is dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::error::SessionError;
use crate::reconciler::{Reconciler, Transition};
use crate::source::WalletSource;
use crate::store::SessionStore;

/// Poll timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Delay between ticks while a wallet is stored.
    pub connected_interval_ms: u64,
    /// Delay between ticks while no wallet is stored.
    pub disconnected_interval_ms: u64,
    /// Lower bound on any sleep, the same clamp browsers apply to zero-delay
    /// timers. Keeps a zero interval from spinning the runtime.
    pub min_tick_ms: u64,
}

impl PollerConfig {
    pub fn connected_interval(&self) -> Duration {
        Duration::from_millis(self.connected_interval_ms)
    }

    pub fn disconnected_interval(&self) -> Duration {
        Duration::from_millis(self.disconnected_interval_ms)
    }

    pub fn min_tick(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            connected_interval_ms: 1_000,
            disconnected_interval_ms: 0,
            min_tick_ms: 4,
        }
    }
}

pub struct Poller<I, E> {
    store: SessionStore,
    injected: I,
    external: E,
    reconciler: Reconciler,
    min_tick: Duration,
}

impl<I, E> Poller<I, E>
where
    I: WalletSource + 'static,
    E: WalletSource + 'static,
{
    pub fn new(
        store: SessionStore,
        injected: I,
        external: E,
        reconciler: Reconciler,
        config: &PollerConfig,
    ) -> Self {
        Self {
            store,
            injected,
            external,
            reconciler,
            min_tick: config.min_tick(),
        }
    }

    /// Poll both sources once and fold the result into the store.
    pub fn tick(&mut self) -> Transition {
        let injected = self.injected.poll();
        let external = self.external.poll();

        let reconciler = &mut self.reconciler;
        let mut transition = Transition::Unchanged;
        self.store.update(|state| {
            transition = reconciler.tick(state, injected.as_ref(), external.as_ref());
        });
        // The store lock is released here; the hook may read the session.
        self.reconciler.run_pending_hook();

        match transition {
            Transition::FirstConnection => {
                let address = self.store.read(|s| s.address());
                tracing::info!(address = ?address, "Solana wallet connected");
            }
            Transition::WalletChanged(origin) => {
                let address = self.store.read(|s| s.address());
                tracing::info!(address = ?address, origin = ?origin, "Solana wallet changed");
            }
            Transition::Disconnected => tracing::info!("Solana wallet disconnected"),
            Transition::Unchanged => tracing::trace!("wallet poll tick"),
        }

        transition
    }

    /// Delay before the next tick.
    pub fn next_delay(&self) -> Duration {
        self.store
            .read(|state| self.reconciler.next_interval(state))
            .max(self.min_tick)
    }

    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(min_tick_ms = self.min_tick.as_millis() as u64, "Wallet poller starting");

        loop {
            let delay = self.next_delay();
            tokio::select! {
                _ = time::sleep(delay) => {
                    self.tick();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Wallet poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    pub fn spawn(self) -> PollerHandle {
        let (tx, rx) = broadcast::channel(1);
        let task = tokio::spawn(self.run(rx));
        PollerHandle {
            shutdown: tx,
            task: Some(task),
        }
    }
}

/// Owner of a running poller.
pub struct PollerHandle {
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stop the loop and wait for the task to exit.
    pub async fn shutdown(mut self) -> Result<(), SessionError> {
        let _ = self.shutdown.send(());
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| SessionError::Internal(format!("poller task failed: {e}")))?;
        }
        Ok(())
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
