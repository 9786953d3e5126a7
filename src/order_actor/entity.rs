//! Entity trait implementation for the Order domain type.
//!
//! The store stamps `created_at` on create and `updated_at` on every committed change.

use super::{OrderAction, OrderError};
use crate::model::{NewOrder, Order, OrderId, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = NewOrder;
    type Update = Order;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, OrderError> {
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
            status: params.status,
            total_price: params.total_price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces quantity, status and total. Owner, product and creation time are fixed.
    async fn on_update(&mut self, replacement: Order, _ctx: &()) -> Result<(), OrderError> {
        if replacement.user_id != self.user_id || replacement.product_id != self.product_id {
            return Err(OrderError::OwnerMismatch {
                user_id: self.user_id,
                product_id: self.product_id,
            });
        }
        self.quantity = replacement.quantity;
        self.status = replacement.status;
        self.total_price = replacement.total_price;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles custom actions for the Order entity.
    ///
    /// # Actions
    /// - `MarkPaid`: checks the owner, then sets `paid` whatever the current status
    async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<Order, OrderError> {
        match action {
            OrderAction::MarkPaid {
                user_id,
                product_id,
            } => {
                if user_id != self.user_id || product_id != self.product_id {
                    return Err(OrderError::OwnerMismatch {
                        user_id: self.user_id,
                        product_id: self.product_id,
                    });
                }
                self.status = OrderStatus::Paid;
                self.updated_at = Utc::now();
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, UserId};
    use resource_actor::{FrameworkError, ResourceActor};

    fn new_order() -> NewOrder {
        NewOrder {
            user_id: UserId(1),
            product_id: ProductId(2),
            quantity: 3,
            status: OrderStatus::Pending,
            total_price: 30.0,
        }
    }

    #[tokio::test]
    async fn test_create_stamps_times() {
        let (actor, client) = ResourceActor::<Order>::new(8);
        tokio::spawn(actor.run(()));

        let order = client.create(new_order()).await.unwrap();
        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.created_at, order.updated_at);
    }

    #[tokio::test]
    async fn test_mark_paid() {
        let (actor, client) = ResourceActor::<Order>::new(8);
        tokio::spawn(actor.run(()));
        let order = client.create(new_order()).await.unwrap();

        let wrong_owner = client
            .perform_action(
                order.id,
                OrderAction::MarkPaid {
                    user_id: UserId(9),
                    product_id: ProductId(2),
                },
            )
            .await;
        assert!(matches!(wrong_owner, Err(FrameworkError::EntityError(_))));
        assert_eq!(
            client.get(order.id).await.unwrap().unwrap().status,
            OrderStatus::Pending
        );

        let pay = OrderAction::MarkPaid {
            user_id: UserId(1),
            product_id: ProductId(2),
        };
        let paid = client.perform_action(order.id, pay.clone()).await.unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
        assert!(paid.updated_at >= paid.created_at);

        // Paying twice is not refused here
        let again = client.perform_action(order.id, pay).await.unwrap();
        assert_eq!(again.status, OrderStatus::Paid);
        assert_eq!(again.created_at, order.created_at);
    }

    #[tokio::test]
    async fn test_update_replaces_status_and_keeps_owner() {
        let (actor, client) = ResourceActor::<Order>::new(8);
        tokio::spawn(actor.run(()));
        let order = client.create(new_order()).await.unwrap();

        let mut shipped = order.clone();
        shipped.status = OrderStatus::from("shipped");
        shipped.created_at = chrono::DateTime::<Utc>::MIN_UTC;
        let shipped = client.update(order.id, shipped).await.unwrap();
        assert_eq!(shipped.status.as_str(), "shipped");
        assert_eq!(shipped.created_at, order.created_at);

        let mut moved = shipped.clone();
        moved.user_id = UserId(9);
        assert!(matches!(
            client.update(order.id, moved).await,
            Err(FrameworkError::EntityError(_))
        ));
    }
}
