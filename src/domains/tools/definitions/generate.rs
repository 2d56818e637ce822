//! Generate tool definition.
//!
//! Single-prompt text completion against a named model.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use super::common::{Access, tool_metadata};
use crate::domains::ollama::{GenerateRequest, OllamaClient, OllamaError};
use crate::domains::tools::registry::ToolEntry;

/// Narrowed view of the upstream response returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub response: String,
    pub model: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

/// Generate tool - text completion from a prompt.
pub struct GenerateTool;

impl GenerateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_generate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate text completion using an Ollama model";

    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn execute(
        client: Arc<OllamaClient>,
        request: GenerateRequest,
    ) -> Result<GenerateOutput, OllamaError> {
        info!("Generating with {} ({} prompt chars)", request.model, request.prompt.len());
        let response = client.generate(&request).await?;

        Ok(GenerateOutput {
            response: response.response,
            model: response.model,
            done: response.done,
            eval_count: response.metrics.eval_count,
            eval_duration: response.metrics.eval_duration,
        })
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::with_arguments(
            tool_metadata::<GenerateRequest>(Self::NAME, Self::DESCRIPTION, Access::ReadOnly),
            Self::execute,
        )
    }
}
