//! Error types for the Product actor.

use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// Prices must be finite and not negative.
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
}
