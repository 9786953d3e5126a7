//! Custom actions for the Order actor.

use crate::model::{ProductId, UserId};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Sets the order's status to `paid`.
    ///
    /// The owner and product must match the stored order, so a payment can only
    /// settle the order it was issued for.
    MarkPaid {
        user_id: UserId,
        product_id: ProductId,
    },
}
