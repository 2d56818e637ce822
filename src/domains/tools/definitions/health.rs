//! Health check tool definition.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use super::common::{Access, NoParams, tool_metadata};
use crate::domains::ollama::{OllamaClient, OllamaError};
use crate::domains::tools::registry::ToolEntry;

#[derive(Debug, Clone, Serialize)]
pub struct HealthOutput {
    pub healthy: bool,
    pub server_url: String,
    pub message: String,
    /// RFC 3339 time of the probe.
    pub checked_at: String,
}

/// Health check tool - probes whether the Ollama server answers.
pub struct HealthCheckTool;

impl HealthCheckTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ollama_health_check";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Check if Ollama server is running and accessible";

    /// Never fails; an unreachable server is reported as `healthy: false`.
    pub async fn execute(client: Arc<OllamaClient>) -> Result<HealthOutput, OllamaError> {
        let healthy = client.check_health().await;
        info!("Health check for {}: healthy={}", client.base_url(), healthy);

        let message = if healthy {
            "Ollama server is running"
        } else {
            "Ollama server is not accessible"
        };

        Ok(HealthOutput {
            healthy,
            server_url: client.base_url().to_string(),
            message: message.to_string(),
            checked_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    pub fn entry() -> ToolEntry {
        ToolEntry::without_arguments(
            tool_metadata::<NoParams>(Self::NAME, Self::DESCRIPTION, Access::ReadOnly),
            Self::execute,
        )
    }
}
