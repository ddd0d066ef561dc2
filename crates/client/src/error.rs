//! Error types for the z.ai client.

/// Result type for client operations.
pub type ZaiResult<T> = Result<T, ZaiError>;

/// Error types that can occur when calling the z.ai API.
#[derive(Debug, thiserror::Error)]
pub enum ZaiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, reset).
    #[error("request to z.ai failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// API returned a non-2xx response.
    #[error("z.ai API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// A 2xx response body could not be decoded.
    #[error("failed to decode z.ai response: {0}")]
    Decode(#[source] reqwest::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ZaiError {
    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of an upstream error response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
