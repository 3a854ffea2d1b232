//! Server name tool definition.
//!
//! Surfaces the display name configured at startup via the `SERVER_NAME`
//! environment value.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::core::config::Config;
use crate::domains::tools::{ToolDefinition, ToolHandler, ToolOutcome, ToolSchema};

/// Server name tool - reports the configured display name.
pub struct ServerNameTool {
    display_name: String,
}

impl ServerNameTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "getServerName";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the server name";

    pub fn new(config: &Config) -> Self {
        Self {
            display_name: config.server.display_name.clone(),
        }
    }

    /// Declared parameter shape: no parameters.
    pub fn schema() -> ToolSchema {
        ToolSchema::empty()
    }

    /// Create the registry definition for this tool.
    pub fn definition(config: &Config) -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(Self::new(config)),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for ServerNameTool {
    async fn call(&self, _arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome> {
        Ok(ToolOutcome::text(self.display_name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_display_name() {
        let mut config = Config::default();
        config.server.display_name = "weather-station-1".to_string();

        let tool = ServerNameTool::new(&config);
        let outcome = tool.call(Map::new()).await.unwrap();
        assert_eq!(outcome, ToolOutcome::text("weather-station-1"));
    }

    #[tokio::test]
    async fn test_default_when_unconfigured() {
        let tool = ServerNameTool::new(&Config::default());
        let outcome = tool.call(Map::new()).await.unwrap();
        assert_eq!(outcome, ToolOutcome::text("No server name set"));
    }
}
