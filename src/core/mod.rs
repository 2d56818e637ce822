//! Core module containing shared infrastructure components.
//!
//! Configuration, error types, the MCP server handler and transport wiring.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, LoggingConfig, OllamaConfig};
pub use error::{Error, ErrorKind, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
