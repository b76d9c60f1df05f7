//! Built-in sample data
//!
//! Seeds the fallback cache the first time the remote service is
//! unreachable with nothing mirrored yet, so browsing and the demo flows
//! keep working on a fresh install.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use shared::models::{FoodItem, Order, OrderItem, OrderStatus, Role, Shop, User};

fn item(food_id: Option<i64>, name: &str, quantity: u32, cents: i64) -> OrderItem {
    let price = Decimal::new(cents, 2);
    OrderItem {
        food_id,
        name: name.to_string(),
        quantity,
        price,
        subtotal: price * Decimal::from(quantity),
    }
}

/// The fixed demo order set (3 entries, distinct ids)
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: 1,
            customer_id: None,
            customer_name: Some("John Doe".to_string()),
            shop_id: None,
            items: vec![
                item(None, "Hamburger", 1, 699),
                item(None, "French Fries", 1, 499),
                item(None, "Soft Drink", 1, 400),
            ],
            total_price: Decimal::new(1598, 2),
            status: OrderStatus::Completed,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 5, 5, 8, 30, 0).unwrap(),
        },
        Order {
            id: 2,
            customer_id: None,
            customer_name: Some("Jane Smith".to_string()),
            shop_id: None,
            items: vec![
                item(None, "Chicken Sandwich", 1, 550),
                item(None, "Onion Rings", 1, 399),
                item(None, "Iced Tea", 1, 300),
            ],
            total_price: Decimal::new(1249, 2),
            status: OrderStatus::Preparing,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 5, 5, 9, 15, 0).unwrap(),
        },
        Order {
            id: 3,
            customer_id: None,
            customer_name: Some("Michael Johnson".to_string()),
            shop_id: None,
            items: vec![
                item(None, "Pizza Slice", 2, 499),
                item(None, "Caesar Salad", 1, 799),
                item(None, "Coffee", 2, 350),
            ],
            total_price: Decimal::new(2497, 2),
            status: OrderStatus::Ready,
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap(),
        },
    ]
}

/// The fixed demo menu
pub fn sample_food_items() -> Vec<FoodItem> {
    vec![
        FoodItem {
            id: 1,
            name: "Chicken Burger".to_string(),
            description: Some("Delicious chicken burger with fresh vegetables".to_string()),
            price: Decimal::new(599, 2),
            quantity: 50,
            available: true,
            shop_id: 1,
        },
        FoodItem {
            id: 2,
            name: "French Fries".to_string(),
            description: Some("Crispy golden french fries".to_string()),
            price: Decimal::new(299, 2),
            quantity: 100,
            available: true,
            shop_id: 1,
        },
        FoodItem {
            id: 3,
            name: "Coca Cola".to_string(),
            description: Some("Refreshing cola drink".to_string()),
            price: Decimal::new(199, 2),
            quantity: 200,
            available: true,
            shop_id: 1,
        },
    ]
}

/// The fixed demo accounts
pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Shop Owner".to_string(),
            email: "shop.owner@gmail.com".to_string(),
            role: Role::Seller,
        },
        User {
            id: 2,
            name: "Customer User".to_string(),
            email: "customer@gmail.com".to_string(),
            role: Role::Customer,
        },
    ]
}

/// The fixed demo shops
pub fn sample_shops() -> Vec<Shop> {
    vec![
        ("Coffee Corner", 1),
        ("Burger Palace", 2),
        ("Salad Bar", 3),
        ("Pizza Heaven", 4),
        ("Sushi Express", 5),
    ]
    .into_iter()
    .map(|(name, id)| Shop {
        id,
        name: name.to_string(),
        contact_info: None,
    })
    .collect()
}

/// Placeholder rendered when an order detail lookup misses both the remote
/// service and the cache in lenient mode.
pub fn placeholder_order(id: i64) -> Order {
    Order {
        id,
        customer_id: None,
        customer_name: Some("Guest Customer".to_string()),
        shop_id: None,
        items: Vec::new(),
        total_price: Decimal::ZERO,
        status: OrderStatus::Preparing,
        notes: None,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_order_ids_are_distinct() {
        let orders = sample_orders();
        assert_eq!(orders.len(), 3);
        let mut ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn sample_totals_match_item_subtotals() {
        for order in sample_orders() {
            let sum: Decimal = order.items.iter().map(|i| i.subtotal).sum();
            assert_eq!(sum, order.total_price, "order {}", order.id);
        }
    }

    #[test]
    fn placeholder_is_preparing_with_zero_total() {
        let order = placeholder_order(42);
        assert_eq!(order.id, 42);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.total_price, Decimal::ZERO);
        assert_eq!(order.customer_name.as_deref(), Some("Guest Customer"));
    }
}
