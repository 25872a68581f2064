//! Tracing subscriber configuration.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber: JSON events with timestamps, filtered
/// through `RUST_LOG` (defaulting to `info`).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so a second call (tests, embedded use) is a no-op.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
