//! Tracing setup for hosts that do not install their own subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "wallet_session=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`]. Returns `false` when a global subscriber was already
/// set, in which case nothing changes.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        init();
        assert!(!init());
    }
}
