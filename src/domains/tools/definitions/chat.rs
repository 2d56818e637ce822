//! Chat tool definition.
//!
//! One conversation turn: the caller supplies the full message history and
//! receives the assistant's reply.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use super::common::{Access, tool_metadata};
use crate::domains::ollama::{ChatMessage, ChatRequest, OllamaClient, OllamaError};
use crate::domains::tools::registry::ToolEntry;

#[derive(Debug, Clone, Serialize)]
pub struct ChatOutput {
    pub message: ChatMessage,
    pub model: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

/// Chat tool - have a conversation with a model.
pub struct ChatTool;

impl ChatTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_chat";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Have a conversation with an Ollama model";

    #[instrument(skip_all, fields(model = %request.model))]
    pub async fn execute(
        client: Arc<OllamaClient>,
        request: ChatRequest,
    ) -> Result<ChatOutput, OllamaError> {
        info!("Chatting with {} ({} messages)", request.model, request.messages.len());
        let response = client.chat(&request).await?;

        Ok(ChatOutput {
            message: response.message,
            model: response.model,
            done: response.done,
            eval_count: response.metrics.eval_count,
            eval_duration: response.metrics.eval_duration,
        })
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::with_arguments(
            tool_metadata::<ChatRequest>(Self::NAME, Self::DESCRIPTION, Access::ReadOnly),
            Self::execute,
        )
    }
}
