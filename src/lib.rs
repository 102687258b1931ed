//! Shared plumbing for the splitledger binaries.

use tracing_subscriber::EnvFilter;

/// Install the process wide tracing subscriber.
///
/// Diagnostics go to stderr so stdout only carries the report or ledger output. The filter
/// comes from `RUST_LOG` and defaults to `warn`. Calling this more than once is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
