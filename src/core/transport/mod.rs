//! Transport wiring for the MCP server.
//!
//! Framing is handled entirely by rmcp; this module only decides which
//! byte stream the [`McpServer`](crate::core::McpServer) is served over:
//! - **STDIO**: standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: one MCP session per accepted socket - feature: `tcp`

mod config;
mod error;
mod service;

#[cfg(feature = "stdio")]
mod stdio;

#[cfg(feature = "tcp")]
mod tcp;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
