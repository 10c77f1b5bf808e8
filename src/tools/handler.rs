use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::kind::ToolKind;
use super::provider::ProviderClient;
use super::request::ToolRequest;
use super::utils::ToolOutcome;

/// Relays one tool to its provider endpoint.
pub struct ProviderToolHandler {
    pub kind: ToolKind,
    pub provider: Arc<ProviderClient>,
}

impl ProviderToolHandler {
    pub fn new(kind: ToolKind, provider: Arc<ProviderClient>) -> Self {
        Self { kind, provider }
    }

    pub async fn invoke(&self, arguments: &HashMap<String, Value>) -> ToolOutcome {
        let request = match ToolRequest::decode(self.kind, arguments) {
            Ok(request) => request,
            Err(message) => return ToolOutcome::failure(message),
        };

        debug!(tool = %self.kind, "forwarding to provider");
        match self.provider.call(&request).await {
            Ok(payload) => ToolOutcome::Success(payload),
            Err(err) => {
                warn!(tool = %self.kind, timeout = err.is_timeout(), error = %err, "provider request failed");
                ToolOutcome::failure(self.kind.failure_message())
            }
        }
    }
}

#[async_trait]
impl ToolHandler for ProviderToolHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        Ok(self.invoke(&arguments).await.into_tool_result())
    }
}
