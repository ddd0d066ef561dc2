//! Error types for the MCP server.

use std::path::PathBuf;
use thiserror::Error;
use zai_client::ZaiError;

/// Failures while handling a single tool invocation.
///
/// None of these escape the dispatcher: each one is rendered into an
/// error-flagged tool result.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The invocation named a tool outside the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments were missing, mistyped or out of the allowed set.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The upstream call failed (HTTP status, connection or decoding).
    #[error(transparent)]
    Upstream(#[from] ZaiError),
}

/// Startup configuration problems. Fatal: the server never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "ZAI_API_KEY is required: set the environment variable, pass --api-key, \
         or add api_key under [zai] in the config file"
    )]
    MissingApiKey,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("temperature must be between 0.0 and 1.0, got {0}")]
    InvalidTemperature(f64),

    #[error("max_tokens must be at least 1")]
    InvalidMaxTokens,

    #[error("model must not be empty")]
    EmptyModel,
}

/// Errors from the stdio transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from stdin.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write to stdout.
    #[error("write error: {0}")]
    Write(String),
}
