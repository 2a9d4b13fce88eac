//! Process-wide logging setup shared by every binary and test harness.

pub mod tracing;

/// Install the JSON tracing subscriber.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init();
}
