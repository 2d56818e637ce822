//! Pull model tool definition.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domains::ollama::{OllamaClient, OllamaError};
use crate::domains::tools::definitions::common::{
    Access, ModelNameParams, StatusOutput, tool_metadata,
};
use crate::domains::tools::registry::ToolEntry;

/// Pull tool - downloads a model from the Ollama registry.
pub struct PullModelTool;

impl PullModelTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_pull_model";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Download/pull a model from Ollama registry";

    #[instrument(skip_all, fields(model = %params.model))]
    pub async fn execute(
        client: Arc<OllamaClient>,
        params: ModelNameParams,
    ) -> Result<StatusOutput, OllamaError> {
        info!("Pulling model {}", params.model);
        client.pull_model(&params.model).await?;
        Ok(StatusOutput::ok(format!(
            "Model {} pulled successfully",
            params.model
        )))
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::with_arguments(
            tool_metadata::<ModelNameParams>(Self::NAME, Self::DESCRIPTION, Access::Mutating),
            Self::execute,
        )
    }
}
