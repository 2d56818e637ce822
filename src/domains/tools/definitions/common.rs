//! Common types shared across tool definitions.

use rmcp::{
    handler::server::tool::schema_for_type,
    model::{Tool, ToolAnnotations},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domains::ollama::Schema;

/// Parameters for tools that act on a single model.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ModelNameParams {
    /// The name of the model (e.g., llama3.2, mistral)
    pub model: String,
}

impl Schema for ModelNameParams {}

/// Schema published for tools that take no arguments.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Result of an administrative operation with no upstream payload.
#[derive(Debug, Clone, Serialize)]
pub struct StatusOutput {
    pub success: bool,
    pub message: String,
}

impl StatusOutput {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Behavioural hints advertised with a tool.
#[derive(Debug, Clone, Copy)]
pub enum Access {
    ReadOnly,
    Mutating,
    Destructive,
}

/// Build a Tool model from a name, description and argument type.
pub fn tool_metadata<P: JsonSchema + 'static>(
    name: &'static str,
    description: &'static str,
    access: Access,
) -> Tool {
    let annotations = ToolAnnotations {
        read_only_hint: Some(matches!(access, Access::ReadOnly)),
        destructive_hint: Some(matches!(access, Access::Destructive)),
        ..Default::default()
    };

    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: schema_for_type::<P>().into(),
        annotations: Some(annotations),
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}
