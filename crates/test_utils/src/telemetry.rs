//! Tracing setup for tests
//!
//! Library crates only emit `tracing` events; installing a subscriber is
//! the job of whoever runs them. Tests call `init_tracing()` to see those
//! events, filtered through `RUST_LOG`.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "warn";

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Another test binary may already own the global subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

/// Installs the test subscriber once per process
///
/// Safe to call from every test.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::debug!("still alive");
    }
}
