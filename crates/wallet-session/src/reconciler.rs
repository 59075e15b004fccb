//! Per-tick reconciliation of the two wallet sources.
//!
//! Solana's injected provider exposes no account-change event, so the only
//! way to notice a switch is to look at it repeatedly. Each tick folds the
//! injected wallet and the managed adapter's wallet into one [`SessionState`].
//! The injected wallet wins when both are present. Web wallets (Solflare and
//! friends) never set the injected global, which is what the managed
//! wallet covers.

use std::time::Duration;

use crate::poller::PollerConfig;
use crate::types::{SessionState, WalletHandle};

/// Side effect run when a connection is established. Wallet modals tend to
/// leave the page in a modal state (scroll locked); this is where the host
/// undoes that.
pub type ConnectionHook = Box<dyn FnMut() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletOrigin {
    Injected,
    External,
}

/// What a tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// First wallet ever seen; the initial address was recorded.
    FirstConnection,
    /// A different wallet replaced the stored one (or reappeared after a
    /// disconnect).
    WalletChanged(WalletOrigin),
    /// Both sources went empty.
    Disconnected,
}

pub struct Reconciler {
    on_connection: Option<ConnectionHook>,
    hook_pending: bool,
    connected_interval: Duration,
    disconnected_interval: Duration,
}

impl Reconciler {
    pub fn new(config: &PollerConfig) -> Self {
        Self {
            on_connection: None,
            hook_pending: false,
            connected_interval: config.connected_interval(),
            disconnected_interval: config.disconnected_interval(),
        }
    }

    pub fn with_hook(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_connection = Some(Box::new(hook));
        self
    }

    pub fn set_hook(&mut self, hook: Option<ConnectionHook>) {
        self.on_connection = hook;
    }

    fn connection_established(&mut self) {
        self.hook_pending = true;
    }

    /// Run the connection hook if the last tick established a connection.
    ///
    /// Kept out of [`Reconciler::tick`] because `tick` runs while the session
    /// store is locked and the hook may read the session.
    pub fn run_pending_hook(&mut self) {
        if !std::mem::take(&mut self.hook_pending) {
            return;
        }
        if let Some(hook) = self.on_connection.as_mut() {
            hook();
        }
    }

    /// Apply one poll observation to `state`.
    ///
    /// The `is_connected` pulse set by the previous tick (or by the host) is
    /// cleared first, so it is visible for exactly one tick. A connection
    /// only marks the hook pending; see [`Reconciler::run_pending_hook`].
    pub fn tick(
        &mut self,
        state: &mut SessionState,
        injected: Option<&WalletHandle>,
        external: Option<&WalletHandle>,
    ) -> Transition {
        state.is_connected = false;

        let was_disconnected = state.is_disconnected;
        let stored = state.address();
        let mut transition = Transition::Unchanged;

        if let Some(injected) = injected {
            let address = injected.address();
            if stored.as_deref() != Some(address.as_str()) {
                state.is_disconnected = false;
                if state.initial_address.is_none() {
                    state.initial_address = Some(address);
                    state.is_connected = true;
                    self.connection_established();
                    transition = Transition::FirstConnection;
                } else {
                    transition = Transition::WalletChanged(WalletOrigin::Injected);
                }
                state.wallet = Some(injected.clone());
            }
        } else if let Some(external) = external {
            if stored.as_deref() != Some(external.address().as_str()) {
                self.connection_established();
                state.wallet = Some(external.clone());
                transition = Transition::WalletChanged(WalletOrigin::External);
            }
        }

        state.is_disconnected = injected.is_none() && external.is_none();
        if state.is_disconnected {
            let had_wallet = state.wallet.take().is_some();
            if had_wallet || !was_disconnected {
                transition = Transition::Disconnected;
            }
        }

        transition
    }

    /// Delay before the next tick: slow while a wallet is stored, as fast as
    /// possible while waiting for one.
    pub fn next_interval(&self, state: &SessionState) -> Duration {
        if state.wallet.is_some() {
            self.connected_interval
        } else {
            self.disconnected_interval
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::types::test_support::wallet;

    fn reconciler() -> Reconciler {
        Reconciler::new(&PollerConfig::default())
    }

    #[test]
    fn empty_tick_is_disconnected() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        for _ in 0..3 {
            assert_eq!(r.tick(&mut state, None, None), Transition::Unchanged);
            assert!(state.is_disconnected());
            assert!(!state.is_connected());
        }
    }

    #[test]
    fn first_injected_wallet_pulses_once() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        let (w, _owner) = wallet(1);

        assert_eq!(r.tick(&mut state, Some(&w), None), Transition::FirstConnection);
        assert!(state.is_connected());
        assert!(!state.is_disconnected());
        assert_eq!(state.initial_address(), Some(w.address().as_str()));
        assert_eq!(state.address(), Some(w.address()));

        for _ in 0..3 {
            assert_eq!(r.tick(&mut state, Some(&w), None), Transition::Unchanged);
            assert!(!state.is_connected());
            assert!(!state.is_disconnected());
        }
    }

    #[test]
    fn initial_address_survives_switch_and_disconnect() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        let (first, _o1) = wallet(1);
        let (second, _o2) = wallet(2);

        r.tick(&mut state, Some(&first), None);
        assert_eq!(
            r.tick(&mut state, Some(&second), None),
            Transition::WalletChanged(WalletOrigin::Injected)
        );
        assert!(!state.is_connected());
        assert_eq!(state.address(), Some(second.address()));

        assert_eq!(r.tick(&mut state, None, None), Transition::Disconnected);
        assert!(state.is_disconnected());
        assert!(state.wallet().is_none());

        r.tick(&mut state, Some(&second), None);
        assert!(!state.is_connected());
        assert_eq!(state.initial_address(), Some(first.address().as_str()));
    }

    #[test]
    fn external_wallet_is_stored_without_pulse() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        let (w, _owner) = wallet(5);

        assert_eq!(
            r.tick(&mut state, None, Some(&w)),
            Transition::WalletChanged(WalletOrigin::External)
        );
        assert_eq!(state.address(), Some(w.address()));
        assert!(!state.is_disconnected());
        assert!(!state.is_connected());
        assert!(state.initial_address().is_none());
    }

    #[test]
    fn injected_wins_over_external() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        let (injected, _o1) = wallet(1);
        let (external, _o2) = wallet(2);

        r.tick(&mut state, Some(&injected), Some(&external));
        assert_eq!(state.address(), Some(injected.address()));
        r.tick(&mut state, Some(&injected), Some(&external));
        assert_eq!(state.address(), Some(injected.address()));
    }

    #[test]
    fn hook_fires_on_first_connection_and_external_changes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut r = reconciler().with_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut state = SessionState::default();
        let (a, _o1) = wallet(1);
        let (b, _o2) = wallet(2);
        let (c, _o3) = wallet(3);

        r.tick(&mut state, Some(&a), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        r.run_pending_hook();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        r.run_pending_hook();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Later injected switches do not re-run the hook.
        r.tick(&mut state, Some(&b), None);
        r.run_pending_hook();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        r.tick(&mut state, None, Some(&c));
        r.run_pending_hook();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        r.tick(&mut state, None, Some(&c));
        r.run_pending_hook();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn interval_follows_stored_wallet() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        let (w, _owner) = wallet(1);

        assert_eq!(r.next_interval(&state), Duration::ZERO);
        r.tick(&mut state, Some(&w), None);
        assert_eq!(r.next_interval(&state), Duration::from_millis(1000));
        r.tick(&mut state, None, None);
        assert_eq!(r.next_interval(&state), Duration::ZERO);
    }

    #[test]
    fn host_pulse_is_cleared_by_next_tick() {
        let mut r = reconciler();
        let mut state = SessionState::default();
        state.is_connected = true;
        r.tick(&mut state, None, None);
        assert!(!state.is_connected());
    }
}
