//! Main client for the z.ai API.

use crate::api::{ChatApi, SearchApi};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{ZaiError, ZaiResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the z.ai API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ZaiClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl ZaiClient {
    /// Create a new client builder.
    pub fn builder() -> ZaiClientBuilder {
        ZaiClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> ZaiResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the chat completion API.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    /// Get the search API.
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }
}

/// Builder for creating a ZaiClient.
pub struct ZaiClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl ZaiClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: None,
        }
    }

    /// Set the base URL of the z.ai API. Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a request timeout. Without one, reqwest's default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> ZaiResult<ZaiClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ZaiError::Config("api_key is required".to_string()))?;

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ZaiError::Config(format!(
                "base_url must be http or https, got: {}",
                base_url.scheme()
            )));
        }

        let mut config = ClientConfig::new(base_url, api_key);
        config.timeout = self.timeout;

        ZaiClient::from_config(config)
    }
}

impl Default for ZaiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
