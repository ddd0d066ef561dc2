//! Search endpoint.

use crate::client::ZaiClient;
use crate::error::ZaiResult;
use serde::{Deserialize, Serialize};

/// Path of the search endpoint, relative to the base URL.
pub const SEARCH_PATH: &str = "search";

/// Search API.
pub struct SearchApi<'a> {
    client: &'a ZaiClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a ZaiClient) -> Self {
        Self { client }
    }

    /// Run a search query.
    pub async fn query(&self, request: &SearchRequest) -> ZaiResult<SearchResponse> {
        self.client.http.post(SEARCH_PATH, request).await
    }
}

/// Request body for `POST search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Response body of `POST search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "link")]
    pub url: Option<String>,
    #[serde(default, alias = "content", alias = "description")]
    pub snippet: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}
