//! Tools domain module.
//!
//! This module handles everything between an MCP `tools/call` and the
//! upstream Ollama client.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Static catalog mapping tool names to their entries
//! - `dispatcher.rs` - Lookup, validation, upstream call and result shaping
//! - `error.rs` - Tool error type and the error envelope
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with `NAME`, `DESCRIPTION`,
//!    `execute()` and `entry()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its `entry()` to `ToolRegistry::new`

pub mod definitions;
mod dispatcher;
mod error;
mod registry;

pub use dispatcher::Dispatcher;
pub use error::{ErrorEnvelope, ToolError};
pub use registry::{ToolEntry, ToolFuture, ToolRegistry};
