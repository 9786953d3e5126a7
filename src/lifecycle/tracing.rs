//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber::fmt` subscriber filtered by
//! the configured log filter (`RUST_LOG`, default `info`). Module paths are hidden
//! (`with_target(false)`); store logs carry an `entity_type` field instead.
//!
//! ```bash
//! # Mutations only
//! RUST_LOG=info cargo run
//!
//! # Payloads at operation entry and every store request
//! RUST_LOG=debug cargo run
//!
//! # Only the lifecycle layer
//! RUST_LOG=commercium::services=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, placing an order looks like:
//!
//! ```text
//! INFO Created entity_type="User" id=user_1 size=1
//! INFO create_user: User created username=ann id=user_1
//! INFO Created entity_type="Product" id=product_1 size=1
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO create_order: Order created id=order_1 total=7.5
//! ```
//!
//! Passwords never reach a log line: request and user types redact them in `Debug`.

use crate::config::AppConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Later calls leave the first subscriber in place.
pub fn setup_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type replaces module paths
        .compact()
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing already initialised");
    }
}
