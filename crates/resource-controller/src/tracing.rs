//! # Tracing Setup
//!
//! Every component logs through `tracing` with structured fields:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `resource` | resource name (`maintenance`, `livraison`, ...) |
//! | `id` | entity id of a mutation or detail read |
//! | `key` | query key of a list request |
//! | `seq` | sequence number of a list request |
//! | `kind` | mutation kind |
//! | `error` | failure message |
//!
//! `info` covers state transitions (fetching, loaded, created, deleted), `warn` covers
//! failures, retries and discarded stale responses, and `debug` adds request payloads.
//!
//! ```bash
//! RUST_LOG=info cargo run -p admin-screens
//! RUST_LOG=resource_controller=debug cargo test
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: compact output, filtered by `RUST_LOG`.
///
/// Panics if a global subscriber is already set; use [`try_setup_tracing`] where that can
/// happen (tests).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but returns `false` instead of panicking when a subscriber is
/// already installed.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_test_writer()
        .try_init()
        .is_ok()
}
