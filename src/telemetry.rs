//! Subscriber setup for the `ethbal` binary
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the process entry point.

use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber (if one is not already active).
///
/// Honours `RUST_LOG`, falling back to `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
