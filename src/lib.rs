//! Weather MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) tool server whose
//! tools are backed by a companion weather HTTP API.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Configuration, error handling, the main server, and the
//!   transport layer (line-delimited JSON-RPC over stdio or TCP)
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: schema validation, the tool registry, the dispatch
//!     engine, and the tool definitions themselves
//!
//! # Example
//!
//! ```rust,no_run
//! use weather_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
