//! Delete model tool definition.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domains::ollama::{OllamaClient, OllamaError};
use crate::domains::tools::definitions::common::{
    Access, ModelNameParams, StatusOutput, tool_metadata,
};
use crate::domains::tools::registry::ToolEntry;

/// Delete tool - removes a model from the local machine.
pub struct DeleteModelTool;

impl DeleteModelTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_delete_model";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete a model from the local machine";

    #[instrument(skip_all, fields(model = %params.model))]
    pub async fn execute(
        client: Arc<OllamaClient>,
        params: ModelNameParams,
    ) -> Result<StatusOutput, OllamaError> {
        info!("Deleting model {}", params.model);
        client.delete_model(&params.model).await?;
        Ok(StatusOutput::ok(format!(
            "Model {} deleted successfully",
            params.model
        )))
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::with_arguments(
            tool_metadata::<ModelNameParams>(Self::NAME, Self::DESCRIPTION, Access::Destructive),
            Self::execute,
        )
    }
}
