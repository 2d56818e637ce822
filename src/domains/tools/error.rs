//! Tool-specific error types and the error envelope returned to callers.

use serde::Serialize;
use thiserror::Error;

use crate::core::error::ErrorKind;
use crate::domains::ollama::{OllamaError, SchemaValidationError};

/// Errors that can occur during a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The caller's arguments do not match the tool's schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] SchemaValidationError),

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] OllamaError),

    /// The success payload could not be encoded.
    #[error("Failed to encode tool output: {0}")]
    Output(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Where this failure sits in the error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTool(_) | Self::Output(_) => ErrorKind::Unknown,
            Self::InvalidArguments(_) => ErrorKind::Validation,
            Self::Upstream(err) => err.kind(),
        }
    }
}

/// The body returned, as JSON text, for every failed tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: bool,
    pub error_type: ErrorKind,
    pub message: String,
    pub tool: String,
}

impl ErrorEnvelope {
    pub fn new(tool: impl Into<String>, err: &ToolError) -> Self {
        Self {
            error: true,
            error_type: err.kind(),
            message: err.to_string(),
            tool: tool.into(),
        }
    }
}
