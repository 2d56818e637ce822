//! HTTP client for the Ollama API.
//!
//! One async method per upstream operation. `list_models`, `generate` and
//! `chat` classify failures in a fixed order:
//!
//! 1. transport failure (refused, unresolved, timed out) -> connection
//! 2. 404 on generate/chat -> model, naming the requested model
//! 3. any other non-2xx status -> model, with status code and reason
//! 4. body that is not JSON or fails schema validation -> response validation
//!
//! Administrative operations (pull, show, delete) report any HTTP or body
//! failure as a generic Ollama error naming the operation and model; only
//! transport failures keep the connection kind.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::error::OllamaError;
use super::schema::{self, Schema};
use super::types::{
    ChatRequest, ChatResponse, GenerateRequest, GenerateResponse, ListModelsResponse,
    ModelDescriptor, ModelNameRequest,
};
use crate::core::config::OllamaConfig;
use crate::core::error::{Error, Result};

const CONNECTION_FAILED: &str = "Cannot connect to Ollama server. Is it running?";

/// Administrative operations, named in their error messages.
#[derive(Debug, Clone, Copy)]
enum AdminOperation {
    Pull,
    Show,
    Delete,
}

impl AdminOperation {
    fn verb(self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Show => "show",
            Self::Delete => "delete",
        }
    }
}

/// Client for a single Ollama server.
///
/// Holds no per-call state; share it behind an `Arc` and call it concurrently.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Build a client for the configured server.
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// The address of the upstream server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List the models available locally, in upstream order.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> std::result::Result<Vec<ModelDescriptor>, OllamaError> {
        let response = self.send(self.http.get(self.url("/api/tags"))).await?;
        let response = check_status(response, None).await?;
        let parsed: ListModelsResponse = decode(response).await?;
        debug!("Listed {} models", parsed.models.len());
        Ok(parsed.models)
    }

    /// Run a single-prompt completion.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> std::result::Result<GenerateResponse, OllamaError> {
        let body = GenerateRequest {
            stream: false,
            ..request.clone()
        };
        let response = self
            .send(self.http.post(self.url("/api/generate")).json(&body))
            .await?;
        let response = check_status(response, Some(&request.model)).await?;
        decode(response).await
    }

    /// Run one conversation turn.
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    pub async fn chat(&self, request: &ChatRequest) -> std::result::Result<ChatResponse, OllamaError> {
        let body = ChatRequest {
            stream: false,
            ..request.clone()
        };
        let response = self
            .send(self.http.post(self.url("/api/chat")).json(&body))
            .await?;
        let response = check_status(response, Some(&request.model)).await?;
        decode(response).await
    }

    /// Probe `GET /`. Never fails: any transport error or non-2xx status is `false`.
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> bool {
        match self.http.get(self.url("/")).send().await {
            Ok(response) => {
                let healthy = response.status().is_success();
                if !healthy {
                    warn!("Health probe returned {}", response.status());
                }
                healthy
            }
            Err(e) => {
                debug!("Health probe failed: {}", e);
                false
            }
        }
    }

    /// Download a model from the registry. Resolves once the pull has completed.
    #[instrument(skip(self))]
    pub async fn pull_model(&self, name: &str) -> std::result::Result<(), OllamaError> {
        let body = ModelNameRequest {
            name,
            stream: Some(false),
        };
        self.admin(
            AdminOperation::Pull,
            name,
            self.http.post(self.url("/api/pull")).json(&body),
        )
        .await?;
        Ok(())
    }

    /// Fetch the model's Modelfile, parameters and details as raw JSON.
    #[instrument(skip(self))]
    pub async fn show_model(&self, name: &str) -> std::result::Result<Value, OllamaError> {
        let body = ModelNameRequest { name, stream: None };
        let response = self
            .admin(
                AdminOperation::Show,
                name,
                self.http.post(self.url("/api/show")).json(&body),
            )
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| admin_error(AdminOperation::Show, name, e.to_string()).with_source(e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| admin_error(AdminOperation::Show, name, e.to_string()).with_source(e))
    }

    /// Remove a model from the local machine.
    #[instrument(skip(self))]
    pub async fn delete_model(&self, name: &str) -> std::result::Result<(), OllamaError> {
        let body = ModelNameRequest { name, stream: None };
        self.admin(
            AdminOperation::Delete,
            name,
            self.http.delete(self.url("/api/delete")).json(&body),
        )
        .await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> std::result::Result<Response, OllamaError> {
        request
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, err: reqwest::Error) -> OllamaError {
        warn!("Upstream request failed: {}", err);
        let message = if err.is_timeout() {
            format!(
                "Ollama server did not respond within {}s",
                self.timeout.as_secs()
            )
        } else {
            CONNECTION_FAILED.to_string()
        };
        OllamaError::connection(message).with_source(err)
    }

    async fn admin(
        &self,
        operation: AdminOperation,
        name: &str,
        request: RequestBuilder,
    ) -> std::result::Result<Response, OllamaError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let cause = self.transport_error(e);
                return Err(OllamaError::connection(format!(
                    "Failed to {} model {}: {}",
                    operation.verb(),
                    name,
                    cause.message()
                ))
                .with_source(cause));
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = error_detail(response).await;
        warn!("{} of model {} failed with {}", operation.verb(), name, status);
        Err(admin_error(operation, name, status_message(status, detail)))
    }
}

fn admin_error(operation: AdminOperation, name: &str, cause: String) -> OllamaError {
    OllamaError::ollama(format!(
        "Failed to {} model {}: {}",
        operation.verb(),
        name,
        cause
    ))
}

/// Map a non-2xx response to a model error; 404 names the model when one was requested.
async fn check_status(
    response: Response,
    model: Option<&str>,
) -> std::result::Result<Response, OllamaError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let (StatusCode::NOT_FOUND, Some(model)) = (status, model) {
        return Err(OllamaError::model(format!(
            "Model '{}' not found. Try pulling it first.",
            model
        )));
    }

    let detail = error_detail(response).await;
    Err(OllamaError::model(status_message(status, detail)))
}

fn status_message(status: StatusCode, detail: Option<String>) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    match detail {
        Some(detail) => format!("HTTP {}: {} - {}", status.as_u16(), reason, detail),
        None => format!("HTTP {}: {}", status.as_u16(), reason),
    }
}

/// The `error` field Ollama puts in failure bodies, if present.
async fn error_detail(response: Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("error")?.as_str().map(str::to_string)
}

async fn decode<T: Schema>(response: Response) -> std::result::Result<T, OllamaError> {
    let bytes = response.bytes().await.map_err(|e| {
        OllamaError::connection(format!("Failed to read response body: {e}")).with_source(e)
    })?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        OllamaError::invalid_response(format!("Failed to parse response: {e}")).with_source(e)
    })?;

    schema::validate(value).map_err(|e| {
        OllamaError::invalid_response(format!("Failed to parse response: {e}")).with_source(e)
    })
}
