//! Client configuration

use std::path::PathBuf;

/// Behavior of `fetch_order_by_id` when an order is absent from both the
/// remote service and the fallback cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// Synthesize a placeholder order so the detail view always has
    /// something to render. Matches the storefront's demo behavior.
    #[default]
    Lenient,
    /// Report the miss as a not-found error.
    Strict,
}

/// Client configuration for connecting to the WildEats services
///
/// # Environment variables
///
/// All fields can be seeded from the environment via [`ClientConfig::from_env`]:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WILDEATS_BASE_URL | http://localhost:8080 | Service base URL |
/// | WILDEATS_CACHE_PATH | (in-memory) | Fallback cache file |
/// | WILDEATS_TIMEOUT_SECS | 30 | Request timeout in seconds |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Fallback cache file. `None` keeps the mirror in memory only, which
    /// drops the offline working set on restart.
    pub cache_path: Option<PathBuf>,

    /// Placeholder behavior for order-detail misses
    pub lookup: LookupMode,

    /// Bearer token for authenticated requests
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            cache_path: None,
            lookup: LookupMode::default(),
            token: None,
        }
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("WILDEATS_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let mut config = Self::new(base_url);
        if let Ok(path) = std::env::var("WILDEATS_CACHE_PATH") {
            config.cache_path = Some(PathBuf::from(path));
        }
        if let Some(timeout) = std::env::var("WILDEATS_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the fallback cache at the given path
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Set the order-detail lookup mode
    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
