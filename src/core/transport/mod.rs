//! Transport layer for the MCP server.
//!
//! This module frames and deframes protocol messages over a byte stream:
//! - **STDIO**: standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: line-delimited JSON-RPC over raw sockets - feature: `tcp`
//!
//! Both transports share the same connection loop (`connection.rs`) and the
//! same JSON-RPC routing (`jsonrpc.rs`).

mod config;
mod connection;
mod error;
pub mod jsonrpc;
mod service;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "tcp")]
pub mod tcp;

pub use config::TransportConfig;
pub use connection::serve_connection;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
