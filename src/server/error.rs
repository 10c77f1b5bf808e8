use jsonrpc_v2::Error as RpcError;
use mcp_protocol_sdk::McpError;

pub const INVALID_PARAMS: i64 = -32602;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INTERNAL_ERROR: i64 = -32603;

pub trait ToRpcError {
    fn to_rpc_error(self) -> RpcError;
}

fn full(code: i64, message: &str, data: String) -> RpcError {
    RpcError::Full {
        code,
        message: message.to_string(),
        data: Some(Box::new(data)),
    }
}

impl ToRpcError for McpError {
    fn to_rpc_error(self) -> RpcError {
        match self {
            McpError::Validation(msg) => full(INVALID_PARAMS, "Validation error", msg),
            McpError::ToolNotFound(msg) => full(METHOD_NOT_FOUND, "Tool not found", msg),
            McpError::Timeout(msg) => full(-32000, "Timeout", msg),
            McpError::Cancelled(msg) => full(-32002, "Operation cancelled", msg),
            McpError::Internal(msg) => full(INTERNAL_ERROR, "Internal error", msg),
            other => full(INTERNAL_ERROR, "Internal error", other.to_string()),
        }
    }
}
