//! STDIO transport implementation.
//!
//! Standard input/output transport - the default MCP mode. Frames are
//! newline-delimited JSON-RPC messages; responses go to stdout, logs to
//! stderr.

use tracing::info;

use super::TransportResult;
use super::connection::serve_connection;
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin reaches EOF.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        serve_connection(&server, tokio::io::stdin(), tokio::io::stdout()).await?;

        info!("STDIO transport finished");
        Ok(())
    }
}
