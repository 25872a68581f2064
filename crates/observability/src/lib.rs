//! Shared observability setup for the service binaries.

pub mod tracing;

/// Initialize process-wide tracing/logging.
///
/// Call once from `main`, before any request handling; calling again is
/// a no-op.
pub fn init() {
    tracing::init();
}
