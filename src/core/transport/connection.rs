//! Line-delimited JSON-RPC connection loop.
//!
//! The same loop serves every stream transport: stdio, TCP, and the
//! in-memory duplex streams the tests drive.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::warn;

use super::jsonrpc::{JsonRpcRequest, JsonRpcResponse, process_request};
use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Serve one line-delimited JSON-RPC connection until EOF.
///
/// Strictly sequential: the next frame is not decoded until the current
/// response has been written and flushed, so response bytes never
/// interleave and ordering matches request ordering. An undecodable line
/// yields a parse-error response and the connection stays open.
pub async fn serve_connection<R, W>(
    server: &McpServer,
    reader: R,
    mut writer: W,
) -> TransportResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => process_request(server, request).await,
            Err(e) => {
                warn!("Undecodable frame: {}", e);
                Some(JsonRpcResponse::parse_error(format!("Parse error: {e}")))
            }
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_vec(&response).map_err(TransportError::from)?;
            payload.push(b'\n');
            writer.write_all(&payload).await?;
            writer.flush().await?;
        }
    }

    Ok(())
}
