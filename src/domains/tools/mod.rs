//! Tools domain module.
//!
//! This module handles all tool-related functionality for the server.
//! Tools are named, schema-described callable operations exposed to
//! protocol clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Closed parameter schemas and validation
//! - `registry.rs` - Central tool registry (write-once, then read-only)
//! - `dispatch.rs` - Dispatch engine: lookup, validate, execute, contain faults
//! - `outcome.rs` - Invocation outcomes and wire encoding
//! - `handler.rs` - The async handler trait tools implement
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct, a schema, and the `ToolHandler` impl
//! 3. Export it in `definitions/mod.rs`
//! 4. Register it in `definitions::build_registry`

pub mod definitions;
mod dispatch;
mod error;
mod handler;
mod outcome;
mod registry;
mod schema;

pub use dispatch::DispatchEngine;
pub use error::ToolError;
pub use handler::{ToolHandler, parse_arguments};
pub use outcome::{ContentBlock, ToolOutcome};
pub use registry::{ToolDefinition, ToolRegistry};
pub use schema::{FieldKind, FieldSpec, ToolSchema, ValidationError};
