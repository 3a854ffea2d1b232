//! MCP server implementation and lifecycle management.
//!
//! `McpServer` ties the read-only tool registry to the dispatch engine and
//! answers the protocol-level questions the transport asks: what tools
//! exist, what happens when one is called, and what to report during
//! initialize.
//!
//! The registry is populated in [`McpServer::new`], before any transport
//! opens; after that nothing mutates it.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::config::Config;
use crate::core::transport::jsonrpc::PROTOCOL_VERSION;
use crate::domains::tools::{DispatchEngine, ToolOutcome, ToolRegistry, definitions};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatch engine over the registered tools.
    dispatcher: DispatchEngine,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Builds and seals the tool registry; fails only on a registration
    /// conflict, which is a wiring defect caught at startup.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let config = Arc::new(config);

        let registry = definitions::build_registry(&config)?;
        let dispatcher = DispatchEngine::new(
            Arc::new(registry),
            Duration::from_secs(config.tools.timeout_secs),
        );

        Ok(Self { config, dispatcher })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The registry behind the dispatch engine.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        self.dispatcher.registry()
    }

    /// List all available tools as wire metadata.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry().list_all()
    }

    /// Call a tool by name with raw, unvalidated arguments.
    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolOutcome {
        self.dispatcher.dispatch(name, arguments).await
    }

    /// The initialize result reported to a connecting peer.
    pub fn initialize_result(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.name(),
                "version": self.version()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_registers_both_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        let names: Vec<_> = server
            .list_tools()
            .into_iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["getServerName", "getWeatherByCity"]);
    }

    #[test]
    fn test_list_tools_idempotent() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.list_tools(), server.list_tools());
    }

    #[tokio::test]
    async fn test_call_tool_unknown_name() {
        let server = McpServer::new(Config::default()).unwrap();
        let outcome = server.call_tool("nonexistent", None).await;
        match outcome {
            ToolOutcome::Failure(msg) => assert!(msg.contains("unknown tool")),
            ToolOutcome::Success(_) => panic!("expected failure"),
        }
    }
}
