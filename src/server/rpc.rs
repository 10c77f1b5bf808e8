use jsonrpc_v2::{Data, Error as RpcError, Params};
use mcp_protocol_sdk::McpError;
use serde_json::{Value, json};
use tracing::debug;

use super::error::ToRpcError;
use super::state::{AppState, CallParams};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = [PROTOCOL_VERSION, "2025-03-26", "2025-06-18"];
pub const SERVER_NAME: &str = "search1api";

/// Echoes the client's version when it is one we speak, otherwise offers ours.
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|v| SUPPORTED_PROTOCOL_VERSIONS.iter().copied().find(|s| *s == v))
        .unwrap_or(PROTOCOL_VERSION)
}

pub async fn initialize(params: Params<Value>, _data: Data<AppState>) -> Result<Value, RpcError> {
    let requested = params.0.get("protocolVersion").and_then(|v| v.as_str());
    let protocol_version = negotiate_version(requested);
    debug!(requested = ?requested, negotiated = protocol_version, "initialize");

    Ok(json!({
        "protocolVersion": protocol_version,
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
        "capabilities": { "tools": { "listChanged": false } }
    }))
}

pub async fn initialized(_: Params<Value>, _data: Data<AppState>) -> Result<Value, RpcError> {
    Ok(Value::Null)
}

pub async fn ping(_: Params<Value>, _data: Data<AppState>) -> Result<Value, RpcError> {
    Ok(json!({}))
}

pub async fn tools_list(_: Params<Value>, data: Data<AppState>) -> Result<Value, RpcError> {
    Ok(json!({ "tools": data.list_tools() }))
}

pub async fn tools_call(params: Params<CallParams>, data: Data<AppState>) -> Result<Value, RpcError> {
    let CallParams { name, arguments } = params.0;
    if name.is_empty() {
        return Err(McpError::validation("Missing 'name' in params".to_string()).to_rpc_error());
    }

    debug!(tool = %name, "tools/call");
    let result = data
        .call_tool(&name, arguments)
        .await
        .map_err(ToRpcError::to_rpc_error)?;
    serde_json::to_value(result).map_err(RpcError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_versions_are_echoed() {
        assert_eq!(negotiate_version(Some("2025-03-26")), "2025-03-26");
        assert_eq!(negotiate_version(Some("2024-11-05")), "2024-11-05");
    }

    #[test]
    fn unknown_or_missing_version_falls_back() {
        assert_eq!(negotiate_version(Some("1999-01-01")), PROTOCOL_VERSION);
        assert_eq!(negotiate_version(None), PROTOCOL_VERSION);
    }
}
