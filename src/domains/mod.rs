//! Domains module containing business logic organized by bounded contexts.
//!
//! - `ollama` - the upstream Ollama API: schemas, client and errors
//! - `tools` - the MCP tools exposed over that API

pub mod ollama;
pub mod tools;
