use anyhow::{Context, Result};
use jsonrpc_v2::{Data, MapRouter, Server};
use std::io;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

use crate::config::{ServerSettings, Transport};

use super::dispatch::Dispatcher;
use super::rpc;
use super::state::AppState;

pub fn build_server(state: AppState) -> Arc<Server<MapRouter>> {
    Server::new()
        .with_data(Data::new(state))
        .with_method("initialize", rpc::initialize)
        .with_method("notifications/initialized", rpc::initialized)
        .with_method("ping", rpc::ping)
        .with_method("tools/list", rpc::tools_list)
        .with_method("tools/call", rpc::tools_call)
        .finish()
}

pub async fn run(settings: &ServerSettings, state: AppState) -> Result<()> {
    match settings.transport {
        Transport::Stdio => {
            info!("serving MCP over stdio");
            run_with_server(build_server(state)).await
        }
        Transport::Sse => {
            let dispatcher = Dispatcher::spawn(state).context("failed to start dispatch worker")?;
            super::sse::serve(&settings.bind_addr(), dispatcher).await
        }
    }
}

pub async fn run_with_server(server: Arc<Server<MapRouter>>) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = io::stdout();
    super::io::run_with_io(server, stdin, stdout).await
}
