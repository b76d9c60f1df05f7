//! WildEats Client - storefront service layer
//!
//! Remote-first access to the WildEats API with a durable offline fallback:
//! when the remote service is unreachable, reads and writes are served from
//! a local redb mirror, the client reports itself degraded, and the UI is
//! told through a notice stream instead of a hard failure.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notice;
pub mod sample;
pub mod store;

pub use cache::{CacheError, FallbackCache};
pub use client::WildEatsClient;
pub use config::{ClientConfig, LookupMode};
pub use error::{StoreError, StoreResult};
pub use http::HttpClient;
pub use notice::{Notice, NoticeLevel, StatusHub};
pub use store::{AuthClient, FoodStore, OrderStore, ShopStore, UserStore};

// Re-export shared types for convenience
pub use shared::models::{FoodItem, Order, OrderDraft, OrderItem, OrderStatus, Role, Shop, User};
pub use shared::workflow::TransitionError;
