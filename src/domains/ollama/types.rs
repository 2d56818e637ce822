//! Request and response shapes for the Ollama HTTP API.
//!
//! Request types double as tool argument schemas: they derive `JsonSchema`
//! so the registry can publish them as each tool's `inputSchema`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::{Schema, SchemaValidationError};

/// Opaque model parameters (temperature, top_p, ...), forwarded unmodified.
pub type ModelOptions = Map<String, Value>;

// ============================================================================
// Model catalog
// ============================================================================

/// A model entry from `GET /api/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub model: String,
    pub modified_at: String,
    pub size: u64,
    pub digest: String,
    pub details: ModelDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDetails {
    pub parent_model: String,
    pub format: String,
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<String>>,
    pub parameter_size: String,
    pub quantization_level: String,
}

/// Body of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListModelsResponse {
    pub models: Vec<ModelDescriptor>,
}

impl Schema for ListModelsResponse {}

// ============================================================================
// Generation
// ============================================================================

/// Parameters for a single-prompt completion (`POST /api/generate`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateRequest {
    /// The name of the model to use
    pub model: String,

    /// The prompt to generate from (may be empty)
    pub prompt: String,

    /// System message to set context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Model parameters like temperature, top_p, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ModelOptions>,

    /// Base64-encoded images for multimodal models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Response format, e.g. "json"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Prompt template overriding the one defined in the Modelfile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Context returned by a previous generate call, to continue a conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,

    /// Whether to stream the response (responses are always returned complete)
    #[serde(default)]
    pub stream: bool,

    /// Send the prompt without applying the prompt template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,

    /// How long the model stays loaded after the request, e.g. "5m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
}

impl Schema for GenerateRequest {}

/// Body of `POST /api/generate` with `stream: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
}

impl Schema for GenerateResponse {}

/// Timing and token counters reported with a completed response.
///
/// Durations are in nanoseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_duration: Option<u64>,
}

// ============================================================================
// Chat
// ============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatMessage {
    /// Message author
    pub role: Role,

    /// Message content
    pub content: String,

    /// Base64-encoded images attached to the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    /// Tool calls requested by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<Value>>,
}

/// Parameters for a conversation turn (`POST /api/chat`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatRequest {
    /// The name of the model to use
    pub model: String,

    /// Array of conversation messages, oldest first
    #[schemars(length(min = 1))]
    pub messages: Vec<ChatMessage>,

    /// Tool definitions the model may call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,

    /// Response format, e.g. "json"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Model parameters like temperature, top_p, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ModelOptions>,

    /// Whether to stream the response (responses are always returned complete)
    #[serde(default)]
    pub stream: bool,

    /// How long the model stays loaded after the request, e.g. "5m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
}

impl Schema for ChatRequest {
    fn check(&self) -> Result<(), SchemaValidationError> {
        if self.messages.is_empty() {
            return Err(SchemaValidationError::new(
                "messages: expected at least one message",
            ));
        }
        Ok(())
    }
}

/// Body of `POST /api/chat` with `stream: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub created_at: String,
    pub message: ChatMessage,
    pub done: bool,
    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
}

impl Schema for ChatResponse {}

// ============================================================================
// Administrative operations
// ============================================================================

/// Body sent to `/api/pull`, `/api/show` and `/api/delete`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelNameRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}
