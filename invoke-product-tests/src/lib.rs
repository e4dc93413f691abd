pub mod sweep;

use tracing_subscriber::EnvFilter;

/// Install a test-friendly `tracing` subscriber, filtered by `RUST_LOG`.
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
