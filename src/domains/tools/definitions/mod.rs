//! Tool definitions module.
//!
//! This module exports all available tool definitions and builds the
//! process-wide registry. Each tool is defined in its own file.

pub mod server_name;
pub mod weather;

pub use server_name::ServerNameTool;
pub use weather::{WeatherParams, WeatherTool};

use crate::core::config::Config;
use crate::domains::tools::ToolRegistry;

/// Build the tool registry with all registered tools.
///
/// Called once at startup, before the transport opens; the registry is
/// read-only afterwards.
pub fn build_registry(config: &Config) -> crate::core::Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(ServerNameTool::definition(config))?;
    registry.register(WeatherTool::definition(config)?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry() {
        let registry = build_registry(&Config::default()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.lookup(ServerNameTool::NAME).is_some());
        assert!(registry.lookup(WeatherTool::NAME).is_some());
    }

    #[test]
    fn test_registry_metadata_matches_consts() {
        let registry = build_registry(&Config::default()).unwrap();
        let listed = registry.list_all();
        assert_eq!(listed[0]["name"], ServerNameTool::NAME);
        assert_eq!(listed[0]["description"], ServerNameTool::DESCRIPTION);
        assert_eq!(listed[1]["name"], WeatherTool::NAME);
        assert_eq!(
            listed[1]["inputSchema"]["required"],
            serde_json::json!(["city"])
        );
    }
}
