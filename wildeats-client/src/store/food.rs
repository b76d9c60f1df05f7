//! Food item store

use crate::cache::FallbackCache;
use crate::error::{HttpError, StoreError, StoreResult};
use crate::http::HttpClient;
use crate::notice::{NoticeLevel, StatusHub};
use crate::sample;
use shared::models::{AvailabilityUpdate, FoodItem, FoodItemCreate, FoodItemUpdate};
use std::sync::Arc;

const FOOD_PATH: &str = "api/food";

/// Menu catalog with remote-first, fallback-second semantics
pub struct FoodStore {
    http: HttpClient,
    cache: FallbackCache,
    hub: Arc<StatusHub>,
}

impl FoodStore {
    pub fn new(http: HttpClient, cache: FallbackCache, hub: Arc<StatusHub>) -> Self {
        Self { http, cache, hub }
    }

    /// Fetch the whole menu
    pub async fn fetch_food_items(&self) -> StoreResult<Vec<FoodItem>> {
        match self.http.get::<Vec<FoodItem>>(FOOD_PATH).await {
            Ok(items) => {
                self.hub.clear_degraded();
                self.cache.put_food_items(&items)?;
                Ok(items)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.fallback_food_items()
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch one shop's menu
    pub async fn fetch_food_items_by_shop(&self, shop_id: i64) -> StoreResult<Vec<FoodItem>> {
        match self
            .http
            .get::<Vec<FoodItem>>(&format!("{FOOD_PATH}/shop/{shop_id}"))
            .await
        {
            Ok(items) => {
                self.hub.clear_degraded();
                self.cache.put_food_items(&items)?;
                Ok(items)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                Ok(self
                    .fallback_food_items()?
                    .into_iter()
                    .filter(|item| item.shop_id == shop_id)
                    .collect())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch a single food item. Offline misses are reported, not papered
    /// over: a menu entry that never existed cannot be rendered.
    pub async fn fetch_food_item_by_id(&self, id: i64) -> StoreResult<FoodItem> {
        match self.http.get::<FoodItem>(&format!("{FOOD_PATH}/{id}")).await {
            Ok(item) => {
                self.hub.clear_degraded();
                self.cache.put_food_item(&item)?;
                Ok(item)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.cache
                    .get_food_item(id)?
                    .ok_or(StoreError::NotFound {
                        entity: "food item",
                        id,
                    })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Create a menu entry (seller workflow)
    pub async fn create_food_item(&self, create: FoodItemCreate) -> StoreResult<FoodItem> {
        match self.http.post::<FoodItem, _>(FOOD_PATH, &create).await {
            Ok(item) => {
                self.hub.clear_degraded();
                self.cache.put_food_item(&item)?;
                self.hub
                    .notify(NoticeLevel::Success, "Food item created successfully!");
                Ok(item)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                let _ = self.fallback_food_items()?;
                let item = FoodItem {
                    id: self.cache.next_food_item_id()?,
                    name: create.name,
                    description: create.description,
                    price: create.price,
                    quantity: create.quantity,
                    available: create.available,
                    shop_id: create.shop_id,
                };
                self.cache.put_food_item(&item)?;
                self.hub
                    .notify(NoticeLevel::Success, "Food item created with offline data.");
                Ok(item)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Update a menu entry; absent fields keep their current value
    pub async fn update_food_item(
        &self,
        id: i64,
        update: FoodItemUpdate,
    ) -> StoreResult<FoodItem> {
        match self
            .http
            .put::<FoodItem, _>(&format!("{FOOD_PATH}/{id}"), &update)
            .await
        {
            Ok(item) => {
                self.hub.clear_degraded();
                self.cache.put_food_item(&item)?;
                Ok(item)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                let mut item = self.cache.get_food_item(id)?.ok_or(StoreError::NotFound {
                    entity: "food item",
                    id,
                })?;
                item.apply_update(update);
                self.cache.put_food_item(&item)?;
                Ok(item)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Toggle menu availability without touching the rest of the record
    pub async fn set_availability(&self, id: i64, available: bool) -> StoreResult<FoodItem> {
        match self
            .http
            .put::<FoodItem, _>(
                &format!("{FOOD_PATH}/{id}/availability"),
                &AvailabilityUpdate { available },
            )
            .await
        {
            Ok(item) => {
                self.hub.clear_degraded();
                self.cache.put_food_item(&item)?;
                Ok(item)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                let mut item = self.cache.get_food_item(id)?.ok_or(StoreError::NotFound {
                    entity: "food item",
                    id,
                })?;
                item.available = available;
                self.cache.put_food_item(&item)?;
                Ok(item)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a menu entry
    pub async fn delete_food_item(&self, id: i64) -> StoreResult<bool> {
        match self.http.delete(&format!("{FOOD_PATH}/{id}")).await {
            Ok(()) => {
                self.hub.clear_degraded();
                self.cache.remove_food_item(id)?;
                Ok(true)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                if !self.cache.remove_food_item(id)? {
                    return Err(StoreError::NotFound {
                        entity: "food item",
                        id,
                    });
                }
                Ok(true)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn fallback_food_items(&self) -> StoreResult<Vec<FoodItem>> {
        let cached = self.cache.list_food_items()?;
        if !cached.is_empty() {
            return Ok(cached);
        }
        let samples = sample::sample_food_items();
        self.cache.put_food_items(&samples)?;
        Ok(samples)
    }
}
