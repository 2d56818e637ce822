//! Error types and handling for the MCP server.
//!
//! This module defines the server-level error type used during startup and
//! the closed [`ErrorKind`] taxonomy that every failed tool call is reported
//! under, whichever domain it originated in.

use serde::Serialize;
use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
///
/// Tool calls never surface this type to clients; it covers configuration,
/// startup and transport failures that abort the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Closed taxonomy of failure kinds reported to tool callers.
///
/// Caller-input and upstream-body validation failures are distinct kinds but
/// share the `validation_error` wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum ErrorKind {
    /// The upstream service could not be reached (refused, unresolved, timed out).
    Connection,
    /// The upstream rejected the model or the request, including not-found.
    Model,
    /// Generic upstream-domain failure, e.g. an administrative operation.
    Ollama,
    /// The caller's tool arguments did not match the tool's schema.
    Validation,
    /// The upstream answered with a body that did not match its schema.
    ResponseValidation,
    /// Anything uncategorized, including unknown tool names.
    Unknown,
}

impl ErrorKind {
    /// The `error_type` string placed in error envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connection => "connection_error",
            Self::Model => "model_error",
            Self::Ollama => "ollama_error",
            Self::Validation | Self::ResponseValidation => "validation_error",
            Self::Unknown => "unknown_error",
        }
    }
}

impl From<ErrorKind> for &'static str {
    fn from(kind: ErrorKind) -> Self {
        kind.as_str()
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_wire_names() {
        assert_eq!(ErrorKind::Connection.as_str(), "connection_error");
        assert_eq!(ErrorKind::Model.as_str(), "model_error");
        assert_eq!(ErrorKind::Ollama.as_str(), "ollama_error");
        assert_eq!(ErrorKind::Validation.as_str(), "validation_error");
        assert_eq!(ErrorKind::ResponseValidation.as_str(), "validation_error");
        assert_eq!(ErrorKind::Unknown.as_str(), "unknown_error");
    }

    #[test]
    fn test_error_kind_serializes_as_wire_name() {
        let value = serde_json::to_value(ErrorKind::Model).unwrap();
        assert_eq!(value, serde_json::json!("model_error"));
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::config("bad url");
        assert_eq!(err.to_string(), "Configuration error: bad url");
    }
}
