//! Offline-fallback walkthrough
//!
//! Points the client at an address with nothing listening, then browses,
//! orders, and progresses an order entirely from the fallback cache.
//!
//! ```bash
//! cargo run --example offline_demo
//! ```

use anyhow::Result;
use rust_decimal::Decimal;
use shared::models::{OrderDraft, OrderItemDraft, OrderStatus, Role};
use wildeats_client::{ClientConfig, WildEatsClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = WildEatsClient::new(ClientConfig::new("http://127.0.0.1:9").with_timeout(2))?;
    let mut notices = client.subscribe_notices();

    let menu = client.food.fetch_food_items().await?;
    println!("menu ({} items, degraded={}):", menu.len(), client.is_degraded());
    for item in &menu {
        println!("  #{} {} - {} ({} left)", item.id, item.name, item.price, item.quantity);
    }

    let order = client
        .orders
        .create_order(OrderDraft {
            customer_id: Some(2),
            shop_id: Some(1),
            items: vec![OrderItemDraft {
                food_id: 1,
                name: "Chicken Burger".to_string(),
                quantity: 2,
                price: Decimal::new(599, 2),
            }],
            total_price: Decimal::new(1198, 2),
            notes: Some("extra pickles".to_string()),
        })
        .await?;
    println!("created order {} ({}, total {})", order.id, order.status, order.total_price);

    let ready = client
        .orders
        .update_order_status(order.id, OrderStatus::Ready, Role::Seller)
        .await?
        .expect("order exists");
    println!("seller moved order {} to {}", ready.id, ready.status);

    let done = client
        .orders
        .update_order_status(order.id, OrderStatus::Completed, Role::Customer)
        .await?
        .expect("order exists");
    println!("customer acknowledged pickup: {}", done.status);

    while let Ok(notice) = notices.try_recv() {
        println!("toast [{:?}]: {}", notice.level, notice.message);
    }

    Ok(())
}
