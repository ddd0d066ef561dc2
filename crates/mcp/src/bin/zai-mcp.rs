// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use zai_mcp::{ConfigOverrides, McpServer, ServerConfig, ToolDispatcher};

#[derive(Parser, Debug)]
#[command(name = "zai-mcp", version)]
#[command(about = "MCP server exposing z.ai chat, search and summarization tools", long_about = None)]
struct Args {
    /// Optional TOML configuration file
    #[arg(short, long, env = "ZAI_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// z.ai API key
    #[arg(long, env = "ZAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// z.ai API base URL
    #[arg(long, env = "ZAI_BASE_URL")]
    base_url: Option<String>,

    /// Default model identifier
    #[arg(long, env = "ZAI_MODEL")]
    model: Option<String>,

    /// Default max tokens per completion
    #[arg(long, env = "ZAI_MAX_TOKENS")]
    max_tokens: Option<u32>,

    /// Default sampling temperature (0.0 - 1.0)
    #[arg(long, env = "ZAI_TEMPERATURE")]
    temperature: Option<f64>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zai_mcp=info,zai_client=info".into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("z.ai MCP server starting...");

    let overrides = ConfigOverrides {
        api_key: args.api_key,
        base_url: args.base_url,
        model: args.model,
        max_tokens: args.max_tokens,
        temperature: args.temperature,
    };
    let config = ServerConfig::load(args.config.as_deref(), overrides)
        .context("Failed to load configuration")?;

    tracing::info!(
        base_url = %config.base_url,
        model = %config.defaults.model,
        "Configuration loaded"
    );

    let dispatcher = ToolDispatcher::new(&config).context("Failed to create z.ai client")?;
    tracing::info!("Registered {} tools", dispatcher.list_tools().len());

    let server = McpServer::new(dispatcher);
    server.start().await?;

    Ok(())
}
