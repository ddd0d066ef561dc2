//! Configuration types for the z.ai client.

use std::fmt;
use std::time::Duration;
use url::Url;

/// Default z.ai API root.
pub const DEFAULT_BASE_URL: &str = "https://api.z.ai/api/paas/v4";

/// Configuration for the z.ai client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the z.ai API. Path segments are kept when joining endpoints.
    pub base_url: Url,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Request timeout. `None` leaves reqwest's default in place.
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and API key.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: None,
            user_agent: format!("zai-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Hand-written so the key never ends up in logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
