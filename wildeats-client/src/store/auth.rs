//! Authentication client
//!
//! Login and registration against the remote auth service, with an offline
//! path over the cached user set. Server-side messages (bad credentials,
//! duplicate email) surface verbatim and are never masked by fallback.

use crate::cache::FallbackCache;
use crate::error::{HttpError, StoreError, StoreResult};
use crate::http::HttpClient;
use crate::notice::StatusHub;
use crate::sample;
use shared::models::{LoginRequest, RegisterRequest, Role, User};
use std::sync::Arc;

const AUTH_PATH: &str = "api/auth";

/// The fixed demo password accepted for offline logins. Real credential
/// checks only ever happen on the server; the offline path exists so the
/// demo accounts stay usable without one.
const DEMO_PASSWORD: &str = "password";

pub struct AuthClient {
    http: HttpClient,
    cache: FallbackCache,
    hub: Arc<StatusHub>,
}

impl AuthClient {
    pub fn new(http: HttpClient, cache: FallbackCache, hub: Arc<StatusHub>) -> Self {
        Self { http, cache, hub }
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self
            .http
            .post::<User, _>(&format!("{AUTH_PATH}/login"), &request)
            .await
        {
            Ok(user) => {
                self.hub.clear_degraded();
                self.cache.put_user(&user)?;
                Ok(user)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.seed_users()?;
                match self.cache.find_user_by_email(email)? {
                    Some(user) if password == DEMO_PASSWORD => Ok(user),
                    _ => Err(StoreError::Validation(
                        "Invalid email or password".to_string(),
                    )),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Register a new account. The role is derived from the email, never
    /// chosen by the caller.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> StoreResult<User> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self
            .http
            .post::<User, _>(&format!("{AUTH_PATH}/register"), &request)
            .await
        {
            Ok(user) => {
                self.hub.clear_degraded();
                self.cache.put_user(&user)?;
                Ok(user)
            }
            Err(HttpError::Unavailable(reason)) => {
                self.hub.enter_degraded(&reason);
                self.seed_users()?;
                if self.cache.find_user_by_email(email)?.is_some() {
                    return Err(StoreError::Validation("Email already in use".to_string()));
                }

                let user = User {
                    id: self.cache.next_user_id()?,
                    name: name.to_string(),
                    email: email.to_string(),
                    role: Role::derive(email),
                };
                self.cache.put_user(&user)?;
                Ok(user)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn seed_users(&self) -> StoreResult<()> {
        if self.cache.list_users()?.is_empty() {
            self.cache.put_users(&sample::sample_users())?;
        }
        Ok(())
    }
}
