//! # Storage Collaborators
//!
//! The narrow contracts the lifecycle components persist through. They are object
//! safe so the lifecycles can hold `Arc<dyn …>` and tests can swap implementations.
//! The in-memory implementations live in [`crate::clients`].

pub mod error;

pub use error::StorageError;

use crate::model::{
    NewOrder, NewUser, Order, OrderDetail, OrderId, Product, ProductId, User, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Every user, ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, StorageError>;

    async fn get_by_id(&self, id: UserId) -> Result<User, StorageError>;

    async fn get_by_username(&self, username: &str) -> Result<User, StorageError>;

    /// Stores a new user. Fails with [`StorageError::Conflict`] if the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, StorageError>;

    /// Replaces the stored record with the same id.
    async fn update(&self, user: User) -> Result<User, StorageError>;

    /// Removes the record, returning the removed snapshot.
    async fn delete(&self, user: User) -> Result<User, StorageError>;
}

#[async_trait]
pub trait ProductStorage: Send + Sync {
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StorageError>;
}

#[async_trait]
pub trait OrderStorage: Send + Sync {
    /// Every order joined with its user and product. Orders whose user or product
    /// no longer exists are left out.
    async fn list_all_detailed(&self) -> Result<Vec<OrderDetail>, StorageError>;

    async fn get_by_id(&self, id: OrderId) -> Result<Order, StorageError>;

    /// Orders created within `[from, to]`, both ends included.
    async fn get_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>, StorageError>;

    async fn create(&self, order: NewOrder) -> Result<Order, StorageError>;

    async fn update(&self, order: Order) -> Result<Order, StorageError>;

    /// Marks the order paid as one store-level step.
    ///
    /// Fails with [`StorageError::Rejected`] when the owner or product does not match
    /// the stored order.
    async fn mark_paid(
        &self,
        order_id: OrderId,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Order, StorageError>;

    async fn delete(&self, order: Order) -> Result<Order, StorageError>;
}
