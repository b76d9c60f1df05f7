//! Shop store

use crate::cache::FallbackCache;
use crate::error::{HttpError, StoreError, StoreResult};
use crate::http::HttpClient;
use crate::notice::StatusHub;
use crate::sample;
use shared::models::Shop;
use std::sync::Arc;

const SHOP_PATH: &str = "api/shop";

/// Shop directory. Reference data only, so this store is read-oriented.
pub struct ShopStore {
    http: HttpClient,
    cache: FallbackCache,
    hub: Arc<StatusHub>,
}

impl ShopStore {
    pub fn new(http: HttpClient, cache: FallbackCache, hub: Arc<StatusHub>) -> Self {
        Self { http, cache, hub }
    }

    /// Fetch all shops
    pub async fn fetch_shops(&self) -> StoreResult<Vec<Shop>> {
        match self.http.get::<Vec<Shop>>(SHOP_PATH).await {
            Ok(shops) => {
                self.hub.clear_degraded();
                self.cache.put_shops(&shops)?;
                Ok(shops)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.fallback_shops()
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch a single shop
    pub async fn fetch_shop_by_id(&self, id: i64) -> StoreResult<Shop> {
        match self.http.get::<Shop>(&format!("{SHOP_PATH}/{id}")).await {
            Ok(shop) => {
                self.hub.clear_degraded();
                self.cache.put_shop(&shop)?;
                Ok(shop)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.fallback_shops()?
                    .into_iter()
                    .find(|shop| shop.id == id)
                    .ok_or(StoreError::NotFound { entity: "shop", id })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn fallback_shops(&self) -> StoreResult<Vec<Shop>> {
        let cached = self.cache.list_shops()?;
        if !cached.is_empty() {
            return Ok(cached);
        }
        let samples = sample::sample_shops();
        self.cache.put_shops(&samples)?;
        Ok(samples)
    }
}
