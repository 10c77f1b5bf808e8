use anyhow::Result;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use search1api_mcp::config::Config;
use search1api_mcp::environment;
use search1api_mcp::server::{build_state, run};

fn init_tracing() {
    // stdout carries the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    environment::load_env();
    init_tracing();

    let config = Config::load_default();
    let provider = environment::provider_settings(&config)?;
    let server_settings = environment::server_settings(&config)?;

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let state = build_state(&client, &config, provider);
    info!(
        tools = ?state.tools_meta.names(),
        transport = %server_settings.transport,
        "search1api MCP server starting"
    );

    run(&server_settings, state).await
}
