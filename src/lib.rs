//! Ollama MCP Server Library
//!
//! This crate exposes a local Ollama instance to Model Context Protocol
//! clients as a fixed set of tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error taxonomy, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **ollama**: request/response schemas and the upstream HTTP client
//!   - **tools**: tool registry, tool definitions and the dispatcher
//!
//! # Example
//!
//! ```rust,no_run
//! use ollama_mcp_server::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::from_env())?;
//!     let result = server
//!         .call_tool("ollama_health_check", serde_json::json!({}))
//!         .await;
//!     println!("{:?}", result.is_error);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, ErrorKind, McpServer, Result};
