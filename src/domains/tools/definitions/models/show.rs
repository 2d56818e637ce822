//! Show model tool definition.

use std::sync::Arc;

use serde_json::Value;

use crate::domains::ollama::{OllamaClient, OllamaError};
use crate::domains::tools::definitions::common::{Access, ModelNameParams, tool_metadata};
use crate::domains::tools::registry::ToolEntry;

/// Show tool - returns the upstream model information verbatim.
pub struct ShowModelTool;

impl ShowModelTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_show_model";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Show detailed information about a specific model";

    pub async fn execute(
        client: Arc<OllamaClient>,
        params: ModelNameParams,
    ) -> Result<Value, OllamaError> {
        client.show_model(&params.model).await
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::with_arguments(
            tool_metadata::<ModelNameParams>(Self::NAME, Self::DESCRIPTION, Access::ReadOnly),
            Self::execute,
        )
    }
}
