//! Tool dispatch: decode an invocation, make one upstream call, shape the result.

use crate::config::{ModelDefaults, ServerConfig};
use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{self, chat, search, summarize, ChatArgs, SearchArgs, SummarizeArgs, ToolKind};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use zai_client::{ZaiClient, ZaiResult};

/// Decoded arguments of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArguments {
    Chat(ChatArgs),
    Search(SearchArgs),
    Summarize(SummarizeArgs),
}

impl ToolArguments {
    /// Decode `arguments` for the tool called `name`.
    ///
    /// A missing (`null`) argument object is treated as `{}` so the error
    /// names the missing required field.
    pub fn decode(name: &str, arguments: serde_json::Value) -> Result<Self, ToolError> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let arguments = if arguments.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            arguments
        };

        let decoded = match kind {
            ToolKind::Chat => Self::Chat(parse(arguments)?),
            ToolKind::Search => Self::Search(parse(arguments)?),
            ToolKind::Summarize => Self::Summarize(parse(arguments)?),
        };
        decoded.validate()?;
        Ok(decoded)
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Chat(_) => ToolKind::Chat,
            Self::Search(_) => ToolKind::Search,
            Self::Summarize(_) => ToolKind::Summarize,
        }
    }

    fn validate(&self) -> Result<(), ToolError> {
        match self {
            Self::Chat(args) => args.validate(),
            Self::Search(args) => args.validate(),
            Self::Summarize(args) => args.validate(),
        }
    }
}

fn parse<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Owns the tool catalog and forwards invocations to z.ai.
///
/// Holds no per-call state; clones share the HTTP connection pool and can be
/// used from concurrent tasks.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    client: ZaiClient,
    defaults: ModelDefaults,
    catalog: Vec<ToolSchema>,
}

impl ToolDispatcher {
    /// Build a dispatcher and its z.ai client from resolved configuration.
    pub fn new(config: &ServerConfig) -> ZaiResult<Self> {
        let client = ZaiClient::builder()
            .base_url(config.base_url.as_str())
            .api_key(config.api_key.clone())
            .build()?;

        Ok(Self::with_client(client, config.defaults.clone()))
    }

    pub fn with_client(client: ZaiClient, defaults: ModelDefaults) -> Self {
        Self {
            client,
            defaults,
            catalog: tools::catalog(),
        }
    }

    /// The static tool catalog.
    pub fn list_tools(&self) -> &[ToolSchema] {
        &self.catalog
    }

    /// Run one tool invocation. Never fails: every error becomes an
    /// error-flagged result.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        let args = match ToolArguments::decode(name, arguments) {
            Ok(args) => args,
            Err(err @ ToolError::UnknownTool(_)) => {
                warn!(tool = %name, "call for unknown tool");
                return CallToolResult::error(err.to_string());
            }
            Err(err) => return error_result(name, &err),
        };

        info!(tool = %name, "executing tool");
        match self.execute(args).await {
            Ok(text) => CallToolResult::text(text),
            Err(err) => error_result(name, &err),
        }
    }

    /// Perform the upstream call for already-decoded arguments.
    pub async fn execute(&self, args: ToolArguments) -> Result<String, ToolError> {
        match args {
            ToolArguments::Chat(args) => {
                let request = args.into_request(&self.defaults);
                debug!(model = %request.model, messages = request.messages.len(), "chat completion");
                let response = self.client.chat().create(&request).await?;
                if let Some(usage) = response.usage {
                    debug!(total_tokens = usage.total_tokens, "chat usage");
                }
                Ok(chat::render(&response))
            }
            ToolArguments::Search(args) => {
                let request = args.to_request();
                debug!(limit = request.limit, "search");
                let response = self.client.search().query(&request).await?;
                Ok(search::render(&args.query, &response))
            }
            ToolArguments::Summarize(args) => {
                debug!(
                    length = args.length.as_str(),
                    style = args.style.label(),
                    chars = args.text.len(),
                    "summarize"
                );
                let request = args.into_request(&self.defaults);
                let response = self.client.chat().create(&request).await?;
                Ok(summarize::render(&response))
            }
        }
    }
}

fn error_result(name: &str, err: &ToolError) -> CallToolResult {
    warn!(tool = %name, error = %err, "tool execution failed");
    CallToolResult::error(format!("Error executing {}: {}", name, err))
}
