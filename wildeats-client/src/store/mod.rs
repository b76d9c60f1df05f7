//! Entity stores
//!
//! Each store tries the remote service first. On success it mirrors the
//! result into the fallback cache and clears the degraded flag; when the
//! service is unreachable it serves the mutation or read from the cache,
//! flips the shared degraded flag, and publishes a notice instead of
//! failing. Structured application errors from the server are surfaced
//! verbatim and never masked by fallback.

mod auth;
mod food;
mod orders;
mod shops;
mod users;

pub use auth::AuthClient;
pub use food::FoodStore;
pub use orders::OrderStore;
pub use shops::ShopStore;
pub use users::UserStore;
