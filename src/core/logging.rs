//! Tracing setup.
//!
//! The crate itself only emits `tracing` events. Servers that do not install
//! their own subscriber can call [`init_tracing`] once at startup; repeated
//! calls are ignored.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use super::config::LogConfig;

static TRACING_INIT: Once = Once::new();

/// Install a compact fmt subscriber filtered by `config` (or `RUST_LOG`).
///
/// First call wins. If another global subscriber is already installed the
/// call is a no-op.
pub fn init_tracing(config: &LogConfig) {
    let directives = config.directives();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact();

        // Another subscriber may already be set by the host.
        let _ = subscriber.try_init();
    });
}

/// [`init_tracing`] with [`LogConfig::default`].
pub fn init_tracing_default() {
    init_tracing(&LogConfig::default());
}
