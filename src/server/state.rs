use mcp_protocol_sdk::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::tools::utils::error_tool_result;
use crate::tools::{ToolKind, ToolMeta, ToolsMeta};

pub const NO_ARGUMENTS: &str = "No arguments provided";

#[derive(Clone)]
pub struct AppState {
    pub tools_meta: ToolsMeta,
    pub handlers: HashMap<ToolKind, Arc<dyn ToolHandler + Send + Sync>>,
}

#[derive(Deserialize, Default)]
pub struct CallParams {
    #[serde(default)]
    pub name: String,
    /// `None` when the field is absent or `null`.
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl AppState {
    pub fn list_tools(&self) -> &[ToolMeta] {
        &self.tools_meta.0
    }

    /// Runs one tool call.
    ///
    /// Data problems (absent arguments, missing required fields, provider
    /// failures) come back as an error *result*; an unknown or disabled tool
    /// name is an `Err` so the transport can answer with a protocol error.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> McpResult<ToolResult> {
        let Some(arguments) = arguments else {
            return Ok(error_tool_result(NO_ARGUMENTS));
        };

        let kind: ToolKind = name.parse()?;
        let handler = self
            .handlers
            .get(&kind)
            .ok_or_else(|| McpError::ToolNotFound(format!("Unknown tool: {name}")))?;

        let arg_map: HashMap<String, Value> = serde_json::from_value(arguments)
            .map_err(|e| McpError::validation(format!("Invalid 'arguments': {e}")))?;

        handler.call(arg_map).await
    }
}
