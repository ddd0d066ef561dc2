//! MCP (Model Context Protocol) server exposing z.ai as tools.
//!
//! Three tools are offered: `zai_chat`, `zai_search` and `zai_summarize`.
//! Each `tools/call` becomes exactly one POST to the z.ai API; failures come
//! back as error-flagged tool results rather than JSON-RPC errors.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::{ConfigOverrides, ModelDefaults, ServerConfig};
pub use dispatcher::{ToolArguments, ToolDispatcher};
pub use error::{ConfigError, ToolError, TransportError};
pub use server::McpServer;
pub use transport::{InboundLine, StdioTransport};
