//! # Demo Binary
//!
//! Exercises the order service end to end against the in-memory adapters:
//! seed a cart, create an order, reconcile its lines, cancel an item,
//! delete it, list what is left.
//!
//! ## Usage
//! ```bash
//! RUST_LOG=info cargo run -p cask-orders --bin demo
//! ```

use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use cask_core::{Cart, CartLine, LineItemInput, Money};
use cask_orders::{
    CreateOrderRequest, InMemoryCartStore, InMemoryOrderStore, ListOrdersRequest,
    LoggingEventPublisher, OrderService, ServiceError, UpdateOrderRequest,
};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let orders = InMemoryOrderStore::new();
    let carts = InMemoryCartStore::new();

    // Seed one cart: 5 lagers at $10.00, 12 stouts at $8.00.
    let lager = Uuid::new_v4();
    let stout = Uuid::new_v4();
    let cart = Cart {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        date: Utc::now(),
        lines: vec![
            CartLine::new(lager, 5, Money::from_cents(1000)),
            CartLine::new(stout, 12, Money::from_cents(800)),
        ],
    };
    let cart_id = cart.id;
    carts.insert(cart).await;
    info!(%cart_id, "cart seeded");

    let service = OrderService::new(orders, carts, LoggingEventPublisher::new());

    // Create: 45.00 + 76.80 = 121.80 across the two discount tiers.
    let created = service
        .create_order(CreateOrderRequest {
            cart_id,
            date: Utc::now() + Duration::days(1),
            branch: "harbor".to_string(),
        })
        .await?;
    info!(order_id = %created.id, total = %created.total_amount, "created");

    // Update: bump the lager line into the deepest tier, drop the stouts.
    let updated = service
        .update_order(UpdateOrderRequest {
            id: created.id,
            user_id: created.user_id,
            date: created.date,
            items: vec![LineItemInput {
                product_id: lager,
                quantity: 10,
                unit_price: Money::from_cents(1000),
            }],
        })
        .await?;
    info!(total = %updated.total_amount, items = updated.items.len(), "updated");

    // Cancel the last line, then delete the order.
    service.cancel_item(created.id, lager).await?;
    service.delete_order(created.id).await?;

    let page = service
        .list_orders(ListOrdersRequest {
            page: 1,
            size: 10,
            order_by: Some("date desc, id".to_string()),
        })
        .await?;
    info!(
        visible = page.items.len(),
        total = page.total_items,
        "listing after delete"
    );

    Ok(())
}
