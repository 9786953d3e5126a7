//! Demo: registers a user, sets up a product, then walks an order through its lifecycle.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

use commercium::config::AppConfig;
use commercium::lifecycle::{setup_tracing, OrderSystem};
use commercium::model::{OrderCreate, OrderId, OrderUpdate, ProductCreate, UserCreate};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    setup_tracing(&config);

    info!("Starting order system demo");
    let system = OrderSystem::new(&config);

    let user = async {
        info!("Registering user");
        system
            .users
            .create_user(UserCreate {
                username: "alice".to_string(),
                full_name: "Alice Liddell".to_string(),
                email: "alice@example.com".to_string(),
                password: "wonderland42".to_string(),
            })
            .await
    }
    .instrument(tracing::info_span!("user_registration"))
    .await?;

    let product = system
        .products
        .create_product(ProductCreate {
            name: "Pocket Watch".to_string(),
            price: 25.0,
        })
        .await?;

    let order = async {
        let order = system
            .orders
            .create_order(OrderCreate {
                user_id: user.id,
                product_id: product.id,
                quantity: 2,
            })
            .await?;
        info!(id = %order.id, total = order.total_price, "Order placed");

        let order = system
            .orders
            .update_order(
                order.id,
                OrderUpdate {
                    quantity: Some(3),
                    status: None,
                },
            )
            .await?;
        info!(id = %order.id, total = order.total_price, "Order resized");

        system.orders.pay_order(order.id).await
    }
    .instrument(tracing::info_span!("order_processing"))
    .await?;
    info!(id = %order.id, status = %order.status, "Order settled");

    if let Err(e) = system.orders.pay_order(OrderId(order.id.0 + 1)).await {
        warn!(code = e.status_code(), error = %e, "Payment refused");
    }

    for detail in system.orders.list_orders().await? {
        info!(
            id = %detail.id,
            username = %detail.username,
            product = %detail.product_name,
            total = detail.total_price,
            status = %detail.status,
            "Order summary"
        );
    }

    system.shutdown().await?;
    Ok(())
}
