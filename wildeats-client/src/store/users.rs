//! User store (admin/demo directory views)

use crate::cache::FallbackCache;
use crate::error::{HttpError, StoreError, StoreResult};
use crate::http::HttpClient;
use crate::notice::StatusHub;
use crate::sample;
use shared::models::User;
use std::sync::Arc;

const USERS_PATH: &str = "api/users";

/// User directory. Account lifecycle lives in [`crate::store::AuthClient`];
/// this store only reads and removes records.
pub struct UserStore {
    http: HttpClient,
    cache: FallbackCache,
    hub: Arc<StatusHub>,
}

impl UserStore {
    pub fn new(http: HttpClient, cache: FallbackCache, hub: Arc<StatusHub>) -> Self {
        Self { http, cache, hub }
    }

    /// Fetch all users
    pub async fn fetch_users(&self) -> StoreResult<Vec<User>> {
        match self.http.get::<Vec<User>>(USERS_PATH).await {
            Ok(users) => {
                self.hub.clear_degraded();
                self.cache.put_users(&users)?;
                Ok(users)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.fallback_users()
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch a single user
    pub async fn fetch_user_by_id(&self, id: i64) -> StoreResult<User> {
        match self.http.get::<User>(&format!("{USERS_PATH}/{id}")).await {
            Ok(user) => {
                self.hub.clear_degraded();
                self.cache.put_user(&user)?;
                Ok(user)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.fallback_users()?
                    .into_iter()
                    .find(|user| user.id == id)
                    .ok_or(StoreError::NotFound { entity: "user", id })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a user. Like order deletion, the local removal happens even
    /// when the remote call cannot (fire-and-forget).
    pub async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        match self.http.delete(&format!("{USERS_PATH}/{id}")).await {
            Ok(()) => self.hub.clear_degraded(),
            Err(HttpError::Unavailable(reason)) => self.hub.enter_degraded(&reason),
            Err(err) => return Err(err.into()),
        }
        self.cache.remove_user(id)?;
        Ok(true)
    }

    fn fallback_users(&self) -> StoreResult<Vec<User>> {
        let cached = self.cache.list_users()?;
        if !cached.is_empty() {
            return Ok(cached);
        }
        let samples = sample::sample_users();
        self.cache.put_users(&samples)?;
        Ok(samples)
    }
}
