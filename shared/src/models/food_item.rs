//! Food Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Food item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in currency unit
    pub price: Decimal,
    /// Remaining stock. Decremented by ordered amounts, never below zero.
    pub quantity: u32,
    pub available: bool,
    pub shop_id: i64,
}

/// Create food item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
    pub available: bool,
    pub shop_id: i64,
}

/// Update food item payload (absent fields keep their current value)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub available: Option<bool>,
}

/// Update availability payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub available: bool,
}

impl FoodItem {
    /// Merge an update into the item, keeping current values for absent
    /// fields.
    pub fn apply_update(&mut self, update: FoodItemUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}
