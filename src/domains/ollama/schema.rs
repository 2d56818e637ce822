//! Structural validation of JSON values.
//!
//! Every tool argument set and every upstream response body is parsed
//! through [`validate`]. Shapes are the serde types in [`super::types`];
//! undeclared keys are ignored, missing required fields, wrong primitive
//! types and values outside an enumerated set are rejected. Types with
//! constraints serde cannot express add them in [`Schema::check`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// A value failed to match the expected shape.
///
/// The message describes the first mismatch found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SchemaValidationError {
    message: String,
}

impl SchemaValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for SchemaValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A shape that raw JSON can be validated against.
pub trait Schema: DeserializeOwned {
    /// Constraints checked after the structure itself has been accepted.
    fn check(&self) -> Result<(), SchemaValidationError> {
        Ok(())
    }
}

/// Validate `value` against the shape `T`, returning the parsed value.
pub fn validate<T: Schema>(value: Value) -> Result<T, SchemaValidationError> {
    let parsed: T = serde_json::from_value(value)?;
    parsed.check()?;
    Ok(parsed)
}
