use crate::auth::BcryptHasher;
use crate::clients::ProductClient;
use crate::config::AppConfig;
use crate::services::{OrderLifecycle, UserLifecycle};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator: starts one store actor per entity type and wires the
/// lifecycle components on top of them.
///
/// # Architecture
///
/// - **User actor**: user records, usernames unique
/// - **Product actor**: the catalogue
/// - **Order actor**: orders; its client also reads users and products for joined listings
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(&AppConfig::from_env());
///
/// let product = system.products.create_product(widget).await?;
/// let user = system.users.create_user(registration).await?;
/// let order = system.orders.create_order(OrderCreate {
///     user_id: user.id,
///     product_id: product.id,
///     quantity: 3,
/// }).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub users: UserLifecycle,
    pub orders: OrderLifecycle,
    /// Catalogue setup; the lifecycles only read products.
    pub products: ProductClient,
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns the three store actors and returns a ready system.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &AppConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors
        let (user_actor, user_client) = crate::user_actor::new(buffer);
        let (product_actor, product_client) = crate::product_actor::new(buffer);
        let (order_actor, order_client) =
            crate::order_actor::new(buffer, user_client.clone(), product_client.clone());

        // 2. Start actors. No store needs a context.
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Wire the lifecycles
        let users = Arc::new(user_client);
        let hasher = Arc::new(BcryptHasher::new(config.bcrypt_cost));
        let user_lifecycle = UserLifecycle::new(users.clone(), hasher);
        let order_lifecycle = OrderLifecycle::new(
            Arc::new(order_client),
            users,
            Arc::new(product_client.clone()),
        );

        info!(buffer, bcrypt_cost = config.bcrypt_cost, "System started");
        Self {
            users: user_lifecycle,
            orders: order_lifecycle,
            products: product_client,
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the lifecycles and the product client closes every store channel, and
    /// each actor leaves its loop. Clones of the lifecycles kept elsewhere hold the
    /// channels open, so drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.users);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
