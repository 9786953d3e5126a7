use crate::clients::{ProductClient, UserClient};
use crate::model::{
    NewOrder, Order, OrderDetail, OrderId, Product, ProductId, User, UserId,
};
use crate::order_actor::OrderAction;
use crate::storage::{OrderStorage, StorageError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Keeps handles to the user and product stores so it can answer the joined
/// listing without the Order actor calling out.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    users: UserClient,
    products: ProductClient,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, users: UserClient, products: ProductClient) -> Self {
        Self {
            inner,
            users,
            products,
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = StorageError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

/// Inner join of orders with their user and product. Rows that do not resolve are dropped.
fn join_details(orders: Vec<Order>, users: Vec<User>, products: Vec<Product>) -> Vec<OrderDetail> {
    let users: HashMap<UserId, User> = users.into_iter().map(|u| (u.id, u)).collect();
    let products: HashMap<ProductId, Product> =
        products.into_iter().map(|p| (p.id, p)).collect();

    orders
        .into_iter()
        .filter_map(|order| {
            let user = users.get(&order.user_id)?;
            let product = products.get(&order.product_id)?;
            Some(OrderDetail {
                id: order.id,
                user_id: order.user_id,
                username: user.username.clone(),
                full_name: user.full_name.clone(),
                product_id: order.product_id,
                product_name: product.name.clone(),
                unit_price: product.price,
                quantity: order.quantity,
                status: order.status,
                total_price: order.total_price,
                created_at: order.created_at,
                updated_at: order.updated_at,
            })
        })
        .collect()
}

#[async_trait]
impl OrderStorage for OrderClient {
    #[instrument(skip(self))]
    async fn list_all_detailed(&self) -> Result<Vec<OrderDetail>, StorageError> {
        let orders = self.list().await?;
        let users = self.users.list().await?;
        let products = self.products.list().await?;
        let total = orders.len();
        let details = join_details(orders, users, products);
        debug!(total, joined = details.len(), "Joined orders");
        Ok(details)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, StorageError> {
        self.get(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>, StorageError> {
        let orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|order| order.created_at >= from && order.created_at <= to)
            .collect();
        debug!(size = orders.len(), "Filtered by creation date");
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn create(&self, order: NewOrder) -> Result<Order, StorageError> {
        debug!("Sending request");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, order), fields(id = %order.id))]
    async fn update(&self, order: Order) -> Result<Order, StorageError> {
        debug!(?order, "Sending request");
        self.inner.update(order.id, order).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn mark_paid(
        &self,
        order_id: OrderId,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Order, StorageError> {
        let paid = self
            .inner
            .perform_action(
                order_id,
                OrderAction::MarkPaid {
                    user_id,
                    product_id,
                },
            )
            .await
            .map_err(Self::map_error)?;
        info!(%order_id, "Order paid");
        Ok(paid)
    }

    async fn delete(&self, order: Order) -> Result<Order, StorageError> {
        ActorClient::delete(self, order.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewUser, OrderStatus};
    use resource_actor::mock::{create_mock_client, expect_action, MockClient};

    fn order(id: u32, user: u32, product: u32, created_at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId(id),
            user_id: UserId(user),
            product_id: ProductId(product),
            quantity: 1,
            status: OrderStatus::Pending,
            total_price: 10.0,
            created_at,
            updated_at: created_at,
        }
    }

    fn user(id: u32, username: &str) -> User {
        NewUser::with_default_role(username, "Full Name", "x@example.com", "hash")
            .into_user(UserId(id))
    }

    #[test]
    fn test_join_drops_unresolved_rows() {
        let now = Utc::now();
        let orders = vec![order(1, 1, 1, now), order(2, 2, 1, now), order(3, 1, 9, now)];
        let users = vec![user(1, "ann")];
        let products = vec![Product::new(ProductId(1), "Widget", 10.0)];

        let details = join_details(orders, users, products);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].id, OrderId(1));
        assert_eq!(details[0].username, "ann");
        assert_eq!(details[0].product_name, "Widget");
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let base = Utc::now();
        let day = chrono::Duration::days(1);
        let mut orders = MockClient::<Order>::new();
        orders.expect_list().return_ok(vec![
            order(1, 1, 1, base - day),
            order(2, 1, 1, base),
            order(3, 1, 1, base + day),
            order(4, 1, 1, base + day + day),
        ]);
        let users = MockClient::<User>::new();
        let products = MockClient::<Product>::new();

        let client = OrderClient::new(
            orders.client(),
            UserClient::new(users.client()),
            ProductClient::new(products.client()),
        );
        let found = client.get_by_date_range(base, base + day).await.unwrap();
        let ids: Vec<OrderId> = found.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(2), OrderId(3)]);

        orders.verify();
        users.verify();
        products.verify();
    }

    #[tokio::test]
    async fn test_mark_paid_sends_owner() {
        let (inner, mut receiver) = create_mock_client::<Order>(4);
        let users = MockClient::<User>::new();
        let products = MockClient::<Product>::new();
        let client = OrderClient::new(
            inner,
            UserClient::new(users.client()),
            ProductClient::new(products.client()),
        );

        let task = tokio::spawn(async move {
            client
                .mark_paid(OrderId(5), UserId(2), ProductId(3))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(5));
        let OrderAction::MarkPaid {
            user_id,
            product_id,
        } = action;
        assert_eq!((user_id, product_id), (UserId(2), ProductId(3)));

        let mut paid = order(5, 2, 3, Utc::now());
        paid.status = OrderStatus::Paid;
        responder.send(Ok(paid)).unwrap();

        assert_eq!(task.await.unwrap().unwrap().status, OrderStatus::Paid);
    }
}
