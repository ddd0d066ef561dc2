// zai_search: web search with a numbered plain-text rendering

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{
    json_schema_integer, json_schema_object, json_schema_open_object, json_schema_string,
};
use serde::Deserialize;
use std::fmt::Write;
use zai_client::{SearchRequest, SearchResponse};

pub const NAME: &str = "zai_search";

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    pub limit: Option<u32>,
    pub filters: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SearchArgs {
    pub fn validate(&self) -> Result<(), ToolError> {
        if self.query.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "'query' must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            filters: self.filters.clone(),
        }
    }
}

pub fn schema() -> ToolSchema {
    ToolSchema {
        name: NAME.to_string(),
        description: "Search the web through z.ai and return a numbered list of results with \
                      titles, URLs and snippets."
            .to_string(),
        input_schema: json_schema_object(
            serde_json::json!({
                "query": json_schema_string("The search query"),
                "limit": json_schema_integer("Maximum number of results (default: 10)", 1, Some(MAX_LIMIT)),
                "filters": json_schema_open_object("Optional structured filters passed through to the search API")
            }),
            vec!["query"],
        ),
    }
}

pub fn render(query: &str, response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return format!("No results found for \"{}\".", query);
    }

    let count = response.results.len();
    let mut out = format!(
        "Found {} result{} for \"{}\":\n",
        count,
        if count == 1 { "" } else { "s" },
        query
    );

    for (idx, result) in response.results.iter().enumerate() {
        let title = result
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled");
        // Writing to a String cannot fail.
        let _ = write!(out, "\n{}. {}", idx + 1, title);
        if let Some(url) = result.url.as_deref().filter(|u| !u.is_empty()) {
            let _ = write!(out, "\n   {}", url);
        }
        if let Some(snippet) = result.snippet.as_deref().filter(|s| !s.trim().is_empty()) {
            let _ = write!(out, "\n   {}", snippet.replace('\n', " "));
        }
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zai_client::SearchResult;

    #[test]
    fn test_limit_default_and_bounds() {
        let args: SearchArgs = serde_json::from_value(json!({"query": "rust"})).unwrap();
        assert_eq!(args.to_request().limit, DEFAULT_LIMIT);

        let huge: SearchArgs = serde_json::from_value(json!({"query": "rust", "limit": 500})).unwrap();
        assert_eq!(huge.to_request().limit, MAX_LIMIT);

        let zero: SearchArgs = serde_json::from_value(json!({"query": "rust", "limit": 0})).unwrap();
        assert_eq!(zero.to_request().limit, 1);
    }

    #[test]
    fn test_filters_forwarded() {
        let args: SearchArgs = serde_json::from_value(json!({
            "query": "rust",
            "filters": {"domain": "docs.rs"}
        }))
        .unwrap();

        let body = serde_json::to_value(args.to_request()).unwrap();
        assert_eq!(body["filters"], json!({"domain": "docs.rs"}));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render("x", &SearchResponse::default()),
            "No results found for \"x\"."
        );
    }

    #[test]
    fn test_render_numbered_list() {
        let response = SearchResponse {
            results: vec![
                SearchResult {
                    title: Some("The Rust Book".to_string()),
                    url: Some("https://doc.rust-lang.org/book".to_string()),
                    snippet: Some("Learn\nRust".to_string()),
                    score: None,
                },
                SearchResult {
                    url: Some("https://docs.rs".to_string()),
                    ..Default::default()
                },
            ],
        };

        assert_eq!(
            render("rust", &response),
            "Found 2 results for \"rust\":\n\n\
             1. The Rust Book\n   https://doc.rust-lang.org/book\n   Learn Rust\n\n\
             2. Untitled\n   https://docs.rs"
        );
    }

    #[test]
    fn test_blank_query_rejected() {
        let args: SearchArgs = serde_json::from_value(json!({"query": ""})).unwrap();
        assert!(args.validate().is_err());
    }
}
