use super::ServiceError;
use crate::model::{
    total_price, NewOrder, Order, OrderCreate, OrderDetail, OrderId, OrderStatus, OrderUpdate,
    Product, ProductId,
};
use crate::storage::{OrderStorage, ProductStorage, StorageError, UserStorage};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const ORDER_NOT_FOUND: &str = "order not found";
const PRODUCT_NOT_FOUND: &str = "product not found";
const USER_NOT_FOUND: &str = "user not found";

/// Maps a storage miss to the given user-facing message and a refused write to a conflict.
fn store_error(message: &'static str) -> impl Fn(StorageError) -> ServiceError {
    move |e| match e {
        StorageError::NotFound(_) => ServiceError::not_found(message),
        StorageError::Rejected(reason) => {
            warn!(%reason, "Store refused the write");
            ServiceError::conflict(reason)
        }
        other => other.into(),
    }
}

/// Order quantities are stored as `u32`; anything larger cannot be placed.
fn to_quantity(quantity: i64) -> Result<u32, ServiceError> {
    u32::try_from(quantity).map_err(|_| ServiceError::validation("quantity is too large"))
}

/// Placement, updates, payment and removal of orders.
///
/// Orders reference a user and a product. Both are checked when the order is placed,
/// and the product again whenever the quantity changes, because the total is always
/// recomputed from the product's current price.
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: Arc<dyn OrderStorage>,
    users: Arc<dyn UserStorage>,
    products: Arc<dyn ProductStorage>,
}

impl OrderLifecycle {
    pub fn new(
        orders: Arc<dyn OrderStorage>,
        users: Arc<dyn UserStorage>,
        products: Arc<dyn ProductStorage>,
    ) -> Self {
        Self {
            orders,
            users,
            products,
        }
    }

    /// Every order with its username and product name.
    pub async fn list_orders(&self) -> Result<Vec<OrderDetail>, ServiceError> {
        Ok(self.orders.list_all_detailed().await?)
    }

    pub async fn get_by_id(&self, id: OrderId) -> Result<Order, ServiceError> {
        self.orders
            .get_by_id(id)
            .await
            .map_err(store_error(ORDER_NOT_FOUND))
    }

    /// Orders created between `from` and `to`, both included.
    #[instrument(skip(self))]
    pub async fn get_by_date_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Order>, ServiceError> {
        let (Some(from), Some(to)) = (from, to) else {
            return Err(ServiceError::validation("date cannot be blank"));
        };
        if from > to {
            return Err(ServiceError::validation(
                "'from' date cannot be after 'to' date",
            ));
        }
        Ok(self.orders.get_by_date_range(from, to).await?)
    }

    async fn product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.products
            .get_by_id(id)
            .await
            .map_err(store_error(PRODUCT_NOT_FOUND))
    }

    /// Places a pending order priced at the product's current unit price.
    #[instrument(skip(self))]
    pub async fn create_order(&self, request: OrderCreate) -> Result<Order, ServiceError> {
        if request.user_id.is_unset() || request.product_id.is_unset() {
            return Err(ServiceError::validation(
                "user id and product id cannot be blank",
            ));
        }
        if request.quantity == 0 {
            return Err(ServiceError::validation("quantity cannot be blank"));
        }

        let product = self.product(request.product_id).await?;
        let user = self
            .users
            .get_by_id(request.user_id)
            .await
            .map_err(store_error(USER_NOT_FOUND))?;

        if request.quantity <= 0 {
            return Err(ServiceError::validation("minimum quantity is 1"));
        }
        let quantity = to_quantity(request.quantity)?;

        let record = NewOrder {
            user_id: user.id,
            product_id: product.id,
            quantity,
            status: OrderStatus::Pending,
            total_price: total_price(quantity, product.price),
        };
        let order = self.orders.create(record).await?;
        info!(id = %order.id, total = order.total_price, "Order created");
        Ok(order)
    }

    /// Changes quantity and/or status.
    ///
    /// A non-zero quantity reprices the order at the product's current price. A non-empty
    /// status replaces the current one as given, with no check on the change.
    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, ServiceError> {
        let mut order = self.get_by_id(id).await?;

        if let Some(quantity) = update.quantity.filter(|&q| q != 0) {
            if quantity < 0 {
                return Err(ServiceError::validation("quantity cannot be less than 1"));
            }
            let quantity = to_quantity(quantity)?;
            let product = self.product(order.product_id).await?;
            debug!(quantity, unit_price = product.price, "Repricing");
            order.reprice(quantity, product.price);
        }

        if let Some(status) = update.status.filter(|s| !s.is_empty()) {
            order.status = OrderStatus::from(status);
        }

        let order = self
            .orders
            .update(order)
            .await
            .map_err(store_error(ORDER_NOT_FOUND))?;
        info!(status = %order.status, "Order updated");
        Ok(order)
    }

    /// Marks the order paid.
    ///
    /// The current status is not checked here; the store applies the payment as one
    /// operation and is the one to refuse it.
    #[instrument(skip(self))]
    pub async fn pay_order(&self, id: OrderId) -> Result<Order, ServiceError> {
        let order = self.get_by_id(id).await?;
        let paid = self
            .orders
            .mark_paid(order.id, order.user_id, order.product_id)
            .await
            .map_err(store_error(ORDER_NOT_FOUND))?;
        info!(previous = %order.status, "Order paid");
        Ok(paid)
    }

    /// Removes the order and returns what was removed.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<Order, ServiceError> {
        let order = self.get_by_id(id).await?;
        let removed = self
            .orders
            .delete(order)
            .await
            .map_err(store_error(ORDER_NOT_FOUND))?;
        info!("Order deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refused_writes_are_conflicts() {
        let to_service = store_error(ORDER_NOT_FOUND);
        assert!(matches!(
            to_service(StorageError::NotFound("order_1".into())),
            ServiceError::NotFound(msg) if msg == ORDER_NOT_FOUND
        ));
        let refused = to_service(StorageError::Rejected("order belongs to user_1".into()));
        assert_eq!(refused.status_code(), 409);
        assert_eq!(refused.to_string(), "order belongs to user_1");
        assert_eq!(
            to_service(StorageError::Unavailable("actor closed".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_quantity_bounds() {
        assert_eq!(to_quantity(1).unwrap(), 1);
        assert_eq!(to_quantity(i64::from(u32::MAX)).unwrap(), u32::MAX);
        assert!(matches!(
            to_quantity(i64::from(u32::MAX) + 1),
            Err(ServiceError::Validation(_))
        ));
    }
}
