//! Client facade
//!
//! Wires the HTTP client, the fallback cache, and the shared status hub
//! into one object constructed at application start. Consumers hold this
//! by reference; there is no ambient global state.

use crate::cache::FallbackCache;
use crate::config::ClientConfig;
use crate::error::StoreResult;
use crate::http::HttpClient;
use crate::notice::{Notice, StatusHub};
use crate::store::{AuthClient, FoodStore, OrderStore, ShopStore, UserStore};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All WildEats stores over one connection, one cache, and one status hub
pub struct WildEatsClient {
    pub orders: OrderStore,
    pub food: FoodStore,
    pub shops: ShopStore,
    pub users: UserStore,
    pub auth: AuthClient,
    hub: Arc<StatusHub>,
}

impl WildEatsClient {
    /// Build the client from configuration. Opens (or creates) the fallback
    /// cache; with no cache path configured the mirror lives in memory and
    /// offline state does not survive a restart.
    pub fn new(config: ClientConfig) -> StoreResult<Self> {
        let cache = match &config.cache_path {
            Some(path) => FallbackCache::open(path)?,
            None => FallbackCache::open_in_memory()?,
        };
        let http = HttpClient::new(&config);
        let hub = StatusHub::new();

        Ok(Self {
            orders: OrderStore::new(http.clone(), cache.clone(), hub.clone(), config.lookup),
            food: FoodStore::new(http.clone(), cache.clone(), hub.clone()),
            shops: ShopStore::new(http.clone(), cache.clone(), hub.clone()),
            users: UserStore::new(http.clone(), cache.clone(), hub.clone()),
            auth: AuthClient::new(http, cache, hub.clone()),
            hub,
        })
    }

    /// Whether the client is currently serving from the fallback cache
    pub fn is_degraded(&self) -> bool {
        self.hub.is_degraded()
    }

    /// Subscribe to user-facing notices (toast material)
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.hub.subscribe()
    }
}
