//! Shared types for the WildEats storefront
//!
//! Entity models, the order status workflow, role derivation, and the
//! wire-level error format consumed by the client crate.

pub mod error;
pub mod models;
pub mod workflow;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ErrorBody;
pub use models::{FoodItem, Order, OrderItem, OrderStatus, Role, Shop, User};
pub use workflow::{TransitionError, check_transition};
