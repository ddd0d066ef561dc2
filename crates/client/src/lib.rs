//! # z.ai client
//!
//! Typed async client for the z.ai chat completion and search API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zai_client::{ChatCompletionRequest, ChatMessage, ZaiClient, ZaiResult};
//!
//! #[tokio::main]
//! async fn main() -> ZaiResult<()> {
//!     let client = ZaiClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let response = client
//!         .chat()
//!         .create(&ChatCompletionRequest {
//!             model: "glm-4.6".to_string(),
//!             messages: vec![ChatMessage::user("Hello!")],
//!             temperature: 0.7,
//!             max_tokens: 512,
//!         })
//!         .await?;
//!
//!     println!("{}", response.first_content().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! Requests are sent exactly once. A non-2xx response becomes
//! [`ZaiError::Api`] carrying the status and raw body; a request that never
//! reached the server becomes [`ZaiError::Transport`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role, SearchRequest,
    SearchResponse, SearchResult,
};
pub use client::{ZaiClient, ZaiClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ZaiError, ZaiResult};
