//! Error types for the Order actor.

use crate::model::{ProductId, UserId};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The request names a different owner or product than the stored order.
    #[error("order belongs to {user_id} for {product_id}")]
    OwnerMismatch {
        user_id: UserId,
        product_id: ProductId,
    },
}
