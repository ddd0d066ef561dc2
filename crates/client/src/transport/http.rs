//! HTTP transport layer for the z.ai client.

use crate::config::ClientConfig;
use crate::error::{ZaiError, ZaiResult};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport for making API requests.
///
/// Every call is a single attempt: non-2xx responses and connection failures
/// are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> ZaiResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ZaiError::Config("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ZaiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, keeping any path on the base URL.
    fn build_url(&self, path: &str) -> ZaiResult<Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    /// Send a request once and turn non-success statuses into errors.
    async fn execute(&self, request_builder: RequestBuilder) -> ZaiResult<Response> {
        let response = request_builder.send().await.map_err(ZaiError::Transport)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "failed to read error response body");
                String::new()
            }
        };
        warn!(status = status.as_u16(), "z.ai returned an error response");
        Err(ZaiError::from_response(status.as_u16(), body))
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ZaiResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        let response = self.execute(self.client.post(url).json(body)).await?;
        response.json().await.map_err(ZaiError::Decode)
    }
}
