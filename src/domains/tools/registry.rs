//! Tool Registry - central registration and lookup for all tools.
//!
//! The registry maps each tool name to its definition: description,
//! parameter schema, and handler. It is built once during startup, before
//! the transport opens, and is read-only afterwards.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};

use super::error::ToolError;
use super::handler::ToolHandler;
use super::schema::ToolSchema;

/// A registered tool: name, description, parameter schema, and handler.
///
/// Immutable after registration.
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub schema: ToolSchema,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ToolSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler,
        }
    }
}

/// Tool registry - manages all available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<ToolDefinition>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool definition.
    ///
    /// Duplicate names are rejected: registration happens once at startup,
    /// so a second definition under the same name is a wiring defect, not a
    /// runtime condition.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), ToolError> {
        if self.tools.contains_key(&definition.name) {
            return Err(ToolError::duplicate(&definition.name));
        }
        self.tools
            .insert(definition.name.clone(), Arc::new(definition));
        Ok(())
    }

    /// Look up a tool by name. Pure read.
    pub fn lookup(&self, name: &str) -> Option<Arc<ToolDefinition>> {
        self.tools.get(name).cloned()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// List all tools as wire metadata for `tools/list`.
    ///
    /// Order is stable (sorted by name), so repeated calls with no
    /// intervening registration return identical results.
    pub fn list_all(&self) -> Vec<Value> {
        self.tools
            .values()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.schema.input_schema(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
