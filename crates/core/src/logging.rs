//! Subscriber setup for the `tracing` events this workspace emits
//!
//! The library itself only emits events; binaries and test suites decide
//! whether anything is printed. Only built with the `logging` feature.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;
use crate::errors::{Error, Result};

fn filter() -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .map_err(|e| Error::configuration(format!("invalid log filter: {e}")))
}

/// Install a compact stderr subscriber filtered by `RUST_LOG`
pub fn init() -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter()?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::configuration(format!("failed to install subscriber: {e}")))
}

/// Install a subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_for_tests() {
    let Ok(filter) = filter() else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
