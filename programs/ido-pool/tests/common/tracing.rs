//! Tracing configuration for tests
//!
//! Ledger mutations log at `debug`/`trace`; run with
//! `RUST_LOG=ido_pool=trace` to see every transfer, mint and burn.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call from every test.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
