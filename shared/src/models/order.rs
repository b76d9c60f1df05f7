//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status
///
/// `COMPLETED` and `CANCELLED` are terminal. The legal moves between the
/// remaining states live in [`crate::workflow`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// A terminal status has no outbound transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Food item reference. Absent on legacy sample data.
    pub food_id: Option<i64>,
    pub name: String,
    pub quantity: u32,
    /// Unit price in currency unit
    pub price: Decimal,
    pub subtotal: Decimal,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Customer reference. Absent on legacy sample data.
    pub customer_id: Option<i64>,
    /// Display name carried by legacy sample data and placeholder orders
    pub customer_name: Option<String>,
    pub shop_id: Option<i64>,
    pub items: Vec<OrderItem>,
    /// Sum of item subtotals at creation time
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Recompute `total_price` from the item subtotals.
    ///
    /// Applied to every edit that does not come from the remote service, so
    /// cached and displayed totals cannot drift apart.
    pub fn recompute_total(&mut self) {
        self.total_price = self.items.iter().map(|item| item.subtotal).sum();
    }
}

/// Line item of an order draft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    pub food_id: i64,
    pub name: String,
    pub quantity: u32,
    /// Unit price in currency unit
    pub price: Decimal,
}

impl OrderItemDraft {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub fn into_item(self) -> OrderItem {
        let subtotal = self.subtotal();
        OrderItem {
            food_id: Some(self.food_id),
            name: self.name,
            quantity: self.quantity,
            price: self.price,
            subtotal,
        }
    }
}

/// Create order payload (cart checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_id: Option<i64>,
    pub shop_id: Option<i64>,
    pub items: Vec<OrderItemDraft>,
    pub total_price: Decimal,
    pub notes: Option<String>,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
