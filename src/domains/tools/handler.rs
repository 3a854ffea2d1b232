//! The tool handler boundary.
//!
//! A handler implements one tool's behavior, given validated arguments.
//! Handlers resolve to a [`ToolOutcome`] for any expected result, including
//! domain-level failures; `Err` is reserved for unexpected faults and is
//! caught at the dispatch boundary.

use serde_json::{Map, Value};

use super::outcome::ToolOutcome;

/// Trait for implementing tool handlers.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with schema-validated arguments.
    async fn call(&self, arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome>;
}

/// Deserialize validated arguments into a typed parameter struct.
///
/// The schema has already checked presence and kinds, so a mismatch here is
/// a programming error in the tool's schema declaration; it is still
/// surfaced as an `Err` rather than a panic.
pub fn parse_arguments<P: serde::de::DeserializeOwned>(
    arguments: Map<String, Value>,
) -> anyhow::Result<P> {
    serde_json::from_value(Value::Object(arguments)).map_err(Into::into)
}
