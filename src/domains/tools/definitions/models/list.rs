//! List models tool definition.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domains::ollama::{ModelDescriptor, OllamaClient, OllamaError};
use crate::domains::tools::definitions::common::{Access, NoParams, tool_metadata};
use crate::domains::tools::registry::ToolEntry;

/// The subset of a model descriptor surfaced to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub size: u64,
    pub modified_at: String,
    pub family: String,
    pub parameter_size: String,
}

impl From<ModelDescriptor> for ModelSummary {
    fn from(model: ModelDescriptor) -> Self {
        Self {
            name: model.name,
            size: model.size,
            modified_at: model.modified_at,
            family: model.details.family,
            parameter_size: model.details.parameter_size,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListModelsOutput {
    pub models: Vec<ModelSummary>,
}

/// List models tool - the models installed on the Ollama server.
pub struct ListModelsTool;

impl ListModelsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_list_models";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all available Ollama models on the local machine";

    pub async fn execute(client: Arc<OllamaClient>) -> Result<ListModelsOutput, OllamaError> {
        let models = client.list_models().await?;
        info!("Found {} models", models.len());

        Ok(ListModelsOutput {
            models: models.into_iter().map(ModelSummary::from).collect(),
        })
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::without_arguments(
            tool_metadata::<NoParams>(Self::NAME, Self::DESCRIPTION, Access::ReadOnly),
            Self::execute,
        )
    }
}
