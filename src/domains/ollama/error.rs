//! Errors returned by the Ollama client.

use thiserror::Error;

use crate::core::error::ErrorKind;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed upstream operation.
///
/// One type for every failure; callers branch on [`OllamaError::kind`]
/// rather than on the concrete type.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OllamaError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl OllamaError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The server could not be reached.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// The server rejected the model or the request.
    pub fn model(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Model, message)
    }

    /// The server answered with a body that does not match its schema.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseValidation, message)
    }

    /// Generic upstream failure.
    pub fn ollama(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Ollama, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
