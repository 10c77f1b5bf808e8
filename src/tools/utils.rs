use mcp_protocol_sdk::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

/// Returns an argument that is present and not `null`, whatever its type.
pub fn present_arg(arguments: &HashMap<String, Value>, key: &str) -> Option<Value> {
    arguments.get(key).filter(|v| !v.is_null()).cloned()
}

/// Returns a non-blank string argument.
pub fn str_arg(arguments: &HashMap<String, Value>, key: &str) -> Option<String> {
    arguments
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

pub fn text_tool_result<T: Into<String>>(text: T) -> ToolResult {
    single_text(text.into(), false)
}

pub fn error_tool_result<T: Into<String>>(text: T) -> ToolResult {
    single_text(text.into(), true)
}

fn single_text(text: String, is_error: bool) -> ToolResult {
    ToolResult {
        content: vec![Content::Text {
            text,
            annotations: None,
            meta: None,
        }],
        is_error: Some(is_error),
        structured_content: None,
        meta: None,
    }
}

/// Result of one tool invocation before it is rendered for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(String),
}

impl ToolOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        ToolOutcome::Failure(message.into())
    }

    /// Renders as a single text item: compact JSON on success, the plain
    /// message on failure.
    pub fn into_tool_result(self) -> ToolResult {
        match self {
            ToolOutcome::Success(payload) => text_tool_result(payload.to_string()),
            ToolOutcome::Failure(message) => error_tool_result(message),
        }
    }
}

/// Text of the first content item, if it is text.
pub fn result_text(result: &ToolResult) -> Option<&str> {
    result.content.iter().find_map(|c| match c {
        Content::Text { text, .. } => Some(text.as_str()),
        _ => None,
    })
}
