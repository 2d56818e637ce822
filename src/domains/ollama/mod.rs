//! Ollama domain module.
//!
//! Everything needed to talk to the upstream Ollama HTTP API:
//!
//! - `types` - request and response shapes for each endpoint
//! - `schema` - validation of raw JSON against those shapes
//! - `client` - one async method per upstream operation, with failure classification
//! - `error` - the single tagged error type returned by the client

mod client;
mod error;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::OllamaClient;
pub use error::OllamaError;
pub use schema::{Schema, SchemaValidationError, validate};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, ModelDescriptor,
    ModelDetails, Role,
};
