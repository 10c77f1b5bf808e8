use mcp_protocol_sdk::prelude::ToolHandler;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::tools::{ProviderClient, ProviderSettings, ProviderToolHandler, ToolKind, list_tools};

use super::state::AppState;

pub fn build_state(client: &Client, config: &Config, settings: ProviderSettings) -> AppState {
    let provider = Arc::new(ProviderClient::new(client.clone(), settings));
    build_state_with_provider(provider, config)
}

pub fn build_state_with_provider(provider: Arc<ProviderClient>, config: &Config) -> AppState {
    let mut handlers: HashMap<ToolKind, Arc<dyn ToolHandler + Send + Sync>> = HashMap::new();

    for kind in ToolKind::ALL {
        if config.is_enabled(kind) {
            handlers.insert(
                kind,
                Arc::new(ProviderToolHandler::new(kind, provider.clone())) as Arc<dyn ToolHandler + Send + Sync>,
            );
        }
    }

    AppState {
        tools_meta: list_tools(|kind| config.is_enabled(kind)),
        handlers,
    }
}
