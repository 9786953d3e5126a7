//! Order store: a `ResourceActor<Order>` that owns timestamps and guards status changes.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates a new Order actor and its client.
///
/// The client keeps the user and product clients to build joined order listings.
pub fn new(
    buffer_size: usize,
    user_client: UserClient,
    product_client: ProductClient,
) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = OrderClient::new(generic_client, user_client, product_client);

    (actor, client)
}
