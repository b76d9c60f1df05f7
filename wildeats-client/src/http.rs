//! HTTP client for the remote WildEats services

use crate::config::ClientConfig;
use crate::error::HttpError;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::ErrorBody;

/// HTTP client for making network requests to the WildEats API
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(transport_error)?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(transport_error)?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(transport_error)?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let mut request = self.client.patch(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(transport_error)?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request, discarding any response body
    pub async fn delete(&self, path: &str) -> Result<(), HttpError> {
        let mut request = self.client.delete(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_for(status, response).await)
    }

    /// Handle the HTTP response
    ///
    /// 2xx bodies must deserialize to the expected entity shape; anything
    /// else is rejected rather than propagated as partial data.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, HttpError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|err| HttpError::Decode(err.to_string()))
    }

    /// Classify a non-2xx response.
    ///
    /// A structured `{message}` body is an application error and surfaces
    /// verbatim. A server error without one means the service is down and
    /// the caller should fall back.
    async fn error_for(status: StatusCode, response: Response) -> HttpError {
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return HttpError::Unavailable(err.to_string()),
        };

        if let Ok(body) = serde_json::from_str::<ErrorBody>(&text)
            && !body.message.is_empty()
        {
            return HttpError::Api {
                status: status.as_u16(),
                message: body.message,
            };
        }

        if status.is_server_error() {
            HttpError::Unavailable(format!("HTTP {}", status.as_u16()))
        } else {
            HttpError::Api {
                status: status.as_u16(),
                message: format!("request failed with HTTP {}", status.as_u16()),
            }
        }
    }
}

/// All send-level failures (refused connection, DNS, timeout) mean the
/// service is unreachable from this client's point of view.
fn transport_error(err: reqwest::Error) -> HttpError {
    HttpError::Unavailable(err.to_string())
}
