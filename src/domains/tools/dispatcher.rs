//! Dispatcher - the single entry point for tool calls.
//!
//! `invoke` looks the tool up, lets its registry entry validate the
//! arguments and call upstream, and shapes the outcome into a
//! `CallToolResult`. Failures never escape as errors: they become an
//! [`ErrorEnvelope`] with `is_error` set.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, Tool};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::{ErrorEnvelope, ToolError};
use super::registry::ToolRegistry;
use crate::domains::ollama::OllamaClient;

/// Routes tool calls to the upstream client.
///
/// Holds only immutable state, so concurrent `invoke` calls are independent.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    client: Arc<OllamaClient>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, client: Arc<OllamaClient>) -> Self {
        Self { registry, client }
    }

    /// Metadata for every registered tool.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.list_tools()
    }

    /// The upstream client shared by every call.
    pub fn client(&self) -> &Arc<OllamaClient> {
        &self.client
    }

    /// Run the tool `name` with raw `arguments`.
    ///
    /// Missing arguments (`null`) are treated as an empty object.
    #[instrument(skip(self, arguments))]
    pub async fn invoke(&self, name: &str, arguments: Value) -> CallToolResult {
        let Some(entry) = self.registry.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return error_result(name, &ToolError::unknown_tool(name));
        };

        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        match entry.call(self.client.clone(), arguments).await {
            Ok(payload) => {
                debug!("Tool {} succeeded", name);
                success_result(&payload)
            }
            Err(err) => {
                info!("Tool {} failed ({}): {}", name, err.kind(), err);
                error_result(name, &err)
            }
        }
    }
}

fn text_content<T: Serialize>(value: &T) -> Content {
    let text = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\":true,\"message\":\"{e}\"}}"));
    Content::text(text)
}

fn success_result(payload: &Value) -> CallToolResult {
    CallToolResult::success(vec![text_content(payload)])
}

fn error_result(name: &str, err: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![text_content(&ErrorEnvelope::new(name, err))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::OllamaConfig;
    use crate::domains::ollama::testing::{self, FakeUpstream};
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{delete, get, post},
    };
    use rmcp::model::RawContent;
    use serde_json::json;

    fn dispatcher_for(base_url: &str) -> Dispatcher {
        let client = OllamaClient::new(&OllamaConfig::with_base_url(base_url)).unwrap();
        Dispatcher::new(Arc::new(ToolRegistry::new()), Arc::new(client))
    }

    /// Parse the single text content item of a result as JSON.
    fn payload(result: &CallToolResult) -> Value {
        assert_eq!(result.content.len(), 1);
        let text = match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        serde_json::from_str(text).unwrap()
    }

    fn is_error(result: &CallToolResult) -> bool {
        result.is_error.unwrap_or(false)
    }

    #[tokio::test]
    async fn test_unknown_tool_never_reaches_upstream() {
        let upstream = FakeUpstream::spawn(Router::new()).await;
        let dispatcher = dispatcher_for(&upstream.base_url);

        for name in ["ollama_dance", "", "generate", "OLLAMA_CHAT"] {
            let result = dispatcher.invoke(name, json!({ "model": "llama3.2" })).await;
            assert!(is_error(&result));
            let body = payload(&result);
            assert_eq!(body["error"], json!(true));
            assert_eq!(body["error_type"], json!("unknown_error"));
            assert_eq!(body["tool"], json!(name));
        }
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_generate_scenario() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/generate",
            post(|| async { Json(testing::generate_json("llama3.2")) }),
        ))
        .await;

        let result = dispatcher_for(&upstream.base_url)
            .invoke(
                "ollama_generate",
                json!({ "model": "llama3.2", "prompt": "Hello world" }),
            )
            .await;

        assert!(!is_error(&result));
        let body = payload(&result);
        assert_eq!(body["response"], json!("Hello! How can I help you today?"));
        assert_eq!(body["model"], json!("llama3.2"));
        assert_eq!(body["done"], json!(true));
        assert_eq!(body["eval_count"], json!(10));
        assert!(body.get("context").is_none());
    }

    #[tokio::test]
    async fn test_chat_scenario() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/chat",
            post(|| async { Json(testing::chat_json("mistral")) }),
        ))
        .await;

        let result = dispatcher_for(&upstream.base_url)
            .invoke(
                "ollama_chat",
                json!({
                    "model": "mistral",
                    "messages": [{ "role": "user", "content": "Hello, how are you?" }]
                }),
            )
            .await;

        assert!(!is_error(&result));
        let body = payload(&result);
        assert_eq!(body["message"]["role"], json!("assistant"));
        assert_eq!(body["done"], json!(true));
    }

    #[tokio::test]
    async fn test_chat_empty_messages_rejected_before_upstream() {
        let upstream = FakeUpstream::spawn(Router::new()).await;
        let result = dispatcher_for(&upstream.base_url)
            .invoke("ollama_chat", json!({ "model": "mistral", "messages": [] }))
            .await;

        assert!(is_error(&result));
        let body = payload(&result);
        assert_eq!(body["error_type"], json!("validation_error"));
        assert_eq!(body["tool"], json!("ollama_chat"));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_missing_required_argument_is_validation_error() {
        let upstream = FakeUpstream::spawn(Router::new()).await;
        let dispatcher = dispatcher_for(&upstream.base_url);

        let result = dispatcher
            .invoke("ollama_generate", json!({ "model": "llama3.2" }))
            .await;
        let body = payload(&result);
        assert_eq!(body["error_type"], json!("validation_error"));
        assert!(body["message"].as_str().unwrap().contains("prompt"));

        let result = dispatcher.invoke("ollama_show_model", Value::Null).await;
        assert_eq!(payload(&result)["error_type"], json!("validation_error"));

        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_generate_404_is_model_error() {
        let upstream = FakeUpstream::spawn(Router::new()).await;
        let result = dispatcher_for(&upstream.base_url)
            .invoke(
                "ollama_generate",
                json!({ "model": "nonexistent-model", "prompt": "Hello" }),
            )
            .await;

        assert!(is_error(&result));
        let body = payload(&result);
        assert_eq!(body["error_type"], json!("model_error"));
        assert!(body["message"].as_str().unwrap().contains("nonexistent-model"));
        assert_eq!(body["tool"], json!("ollama_generate"));
    }

    #[tokio::test]
    async fn test_chat_connection_refused() {
        let result = dispatcher_for(&testing::unreachable_base_url())
            .invoke(
                "ollama_chat",
                json!({ "model": "mistral", "messages": [{ "role": "user", "content": "Hi" }] }),
            )
            .await;

        assert!(is_error(&result));
        assert_eq!(payload(&result)["error_type"], json!("connection_error"));
    }

    #[tokio::test]
    async fn test_chat_timeout_is_connection_error() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/chat",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                Json(testing::chat_json("mistral"))
            }),
        ))
        .await;
        let client = OllamaClient::new(&OllamaConfig {
            timeout_secs: 1,
            ..OllamaConfig::with_base_url(&upstream.base_url)
        })
        .unwrap();
        let dispatcher = Dispatcher::new(Arc::new(ToolRegistry::new()), Arc::new(client));

        let result = dispatcher
            .invoke(
                "ollama_chat",
                json!({ "model": "mistral", "messages": [{ "role": "user", "content": "Hi" }] }),
            )
            .await;

        assert!(is_error(&result));
        let body = payload(&result);
        assert_eq!(body["error_type"], json!("connection_error"));
        assert!(body["message"].as_str().unwrap().contains("within 1s"));
        assert_eq!(body["tool"], json!("ollama_chat"));
    }

    #[tokio::test]
    async fn test_generate_malformed_upstream_body() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({ "model": "llama3.2" })) }),
        ))
        .await;

        let result = dispatcher_for(&upstream.base_url)
            .invoke("ollama_generate", json!({ "model": "llama3.2", "prompt": "Hi" }))
            .await;
        let body = payload(&result);
        assert_eq!(body["error_type"], json!("validation_error"));
        assert!(body["message"].as_str().unwrap().starts_with("Failed to parse response"));
    }

    #[tokio::test]
    async fn test_list_models_narrows_descriptor() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/tags",
            get(|| async { Json(json!({ "models": [testing::model_json("llama3.2:latest", "llama")] })) }),
        ))
        .await;

        let result = dispatcher_for(&upstream.base_url)
            .invoke("ollama_list_models", json!({}))
            .await;

        assert!(!is_error(&result));
        let body = payload(&result);
        assert_eq!(
            body,
            json!({
                "models": [{
                    "name": "llama3.2:latest",
                    "size": 4000000000u64,
                    "modified_at": "2024-01-01T00:00:00Z",
                    "family": "llama",
                    "parameter_size": "7B"
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_show_model_404_is_ollama_error() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/show",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "model 'nonexistent-model' not found" })),
                )
            }),
        ))
        .await;

        let result = dispatcher_for(&upstream.base_url)
            .invoke("ollama_show_model", json!({ "model": "nonexistent-model" }))
            .await;

        assert!(is_error(&result));
        let body = payload(&result);
        assert_eq!(body["error_type"], json!("ollama_error"));
        assert_eq!(body["tool"], json!("ollama_show_model"));
    }

    #[tokio::test]
    async fn test_pull_and_delete_report_success() {
        let upstream = FakeUpstream::spawn(
            Router::new()
                .route("/api/pull", post(|| async { Json(json!({ "status": "success" })) }))
                .route("/api/delete", delete(|| async { StatusCode::OK })),
        )
        .await;
        let dispatcher = dispatcher_for(&upstream.base_url);

        let pulled = payload(
            &dispatcher
                .invoke("ollama_pull_model", json!({ "model": "llama3.2" }))
                .await,
        );
        assert_eq!(
            pulled,
            json!({ "success": true, "message": "Model llama3.2 pulled successfully" })
        );

        let deleted = payload(
            &dispatcher
                .invoke("ollama_delete_model", json!({ "model": "llama3.2" }))
                .await,
        );
        assert_eq!(deleted["message"], json!("Model llama3.2 deleted successfully"));
    }

    #[tokio::test]
    async fn test_health_check_never_errors() {
        let base_url = testing::unreachable_base_url();
        let result = dispatcher_for(&base_url)
            .invoke("ollama_health_check", Value::Null)
            .await;

        assert!(!is_error(&result));
        let body = payload(&result);
        assert_eq!(body["healthy"], json!(false));
        assert_eq!(body["server_url"], json!(base_url));
        assert_eq!(body["message"], json!("Ollama server is not accessible"));
        assert!(body["checked_at"].is_string());
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let upstream = FakeUpstream::spawn(Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                let model = body["model"].as_str().unwrap_or_default().to_string();
                if model == "missing" {
                    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
                } else {
                    (StatusCode::OK, Json(testing::generate_json(&model)))
                }
            }),
        ))
        .await;
        let dispatcher = dispatcher_for(&upstream.base_url);

        let (ok, missing) = tokio::join!(
            dispatcher.invoke("ollama_generate", json!({ "model": "llama3.2", "prompt": "a" })),
            dispatcher.invoke("ollama_generate", json!({ "model": "missing", "prompt": "b" })),
        );

        assert!(!is_error(&ok));
        assert_eq!(payload(&ok)["model"], json!("llama3.2"));
        assert!(is_error(&missing));
        assert_eq!(payload(&missing)["error_type"], json!("model_error"));
    }
}
