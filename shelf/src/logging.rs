//! Development-time tracing.
//!
//! Shelf logs catalog loads and saves at `debug`, each successful add, issue,
//! return, delete and export at `info`, and degraded persistence (unreadable
//! catalog, failed save) at `warn`. Diagnostics go to stderr and never mix
//! with the menu or command output on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn`, so only degraded persistence is
/// shown unless asked for more.
///
/// # Example
/// ```bash
/// RUST_LOG=shelf=debug shelf list
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
