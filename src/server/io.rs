use anyhow::Result;
use jsonrpc_v2::{MapRouter, ResponseObjects, Server};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Handles one raw JSON-RPC message; `None` when there is nothing to send
/// back (notifications).
pub async fn handle_message(server: &Server<MapRouter>, raw: &[u8]) -> Option<String> {
    match server.handle(raw).await {
        ResponseObjects::Empty => None,
        other => match serde_json::to_string(&other) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "failed to serialize response");
                None
            }
        },
    }
}

pub async fn run_with_io<R, W>(server: Arc<Server<MapRouter>>, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(s) = handle_message(&server, trimmed.as_bytes()).await {
            writeln!(writer, "{s}")?;
            writer.flush()?;
        }
    }

    Ok(())
}
