//! Tool Registry - static catalog of every tool the server exposes.
//!
//! Each tool contributes one [`ToolEntry`]: its metadata (name, description,
//! argument schema) and a handler that validates the raw arguments and runs
//! the upstream operation. Adding a tool means adding one entry to
//! [`ToolRegistry::new`]; the dispatcher never changes.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::Tool;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::definitions::{
    ChatTool, DeleteModelTool, GenerateTool, HealthCheckTool, ListModelsTool, PullModelTool,
    ShowModelTool,
};
use super::error::ToolError;
use crate::domains::ollama::{OllamaClient, OllamaError, Schema, schema};

/// Future returned by a tool handler: the success payload or the failure.
pub type ToolFuture = BoxFuture<'static, Result<Value, ToolError>>;

type Handler = Arc<dyn Fn(Arc<OllamaClient>, Value) -> ToolFuture + Send + Sync>;

/// A registered tool: its metadata and how to run it.
#[derive(Clone)]
pub struct ToolEntry {
    tool: Tool,
    handler: Handler,
}

impl ToolEntry {
    /// A tool whose arguments are validated against `P` before `run` is called.
    ///
    /// Arguments that fail validation resolve to [`ToolError::InvalidArguments`]
    /// without calling `run`.
    pub fn with_arguments<P, F, Fut, O>(tool: Tool, run: F) -> Self
    where
        P: Schema + Send + 'static,
        F: Fn(Arc<OllamaClient>, P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, OllamaError>> + Send + 'static,
        O: Serialize + Send + 'static,
    {
        let handler = move |client: Arc<OllamaClient>, arguments: Value| -> ToolFuture {
            match schema::validate::<P>(arguments) {
                Ok(params) => encode(run(client, params)),
                Err(e) => futures::future::ready(Err(ToolError::from(e))).boxed(),
            }
        };

        Self {
            tool,
            handler: Arc::new(handler),
        }
    }

    /// A tool that takes no arguments; whatever the caller sends is ignored.
    pub fn without_arguments<F, Fut, O>(tool: Tool, run: F) -> Self
    where
        F: Fn(Arc<OllamaClient>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, OllamaError>> + Send + 'static,
        O: Serialize + Send + 'static,
    {
        let handler =
            move |client: Arc<OllamaClient>, _arguments: Value| -> ToolFuture { encode(run(client)) };

        Self {
            tool,
            handler: Arc::new(handler),
        }
    }

    /// The tool's metadata as published to clients.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn name(&self) -> &str {
        &self.tool.name
    }

    /// Validate `arguments` and run the tool.
    pub fn call(&self, client: Arc<OllamaClient>, arguments: Value) -> ToolFuture {
        (self.handler)(client, arguments)
    }
}

fn encode<Fut, O>(fut: Fut) -> ToolFuture
where
    Fut: Future<Output = Result<O, OllamaError>> + Send + 'static,
    O: Serialize + Send + 'static,
{
    async move {
        let output = fut.await?;
        Ok(serde_json::to_value(output)?)
    }
    .boxed()
}

/// Tool registry - the fixed, ordered set of tools.
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create the registry with every Ollama tool.
    pub fn new() -> Self {
        Self::from_entries(vec![
            ListModelsTool::entry(),
            GenerateTool::entry(),
            ChatTool::entry(),
            PullModelTool::entry(),
            ShowModelTool::entry(),
            DeleteModelTool::entry(),
            HealthCheckTool::entry(),
        ])
    }

    /// Build a registry from explicit entries, keeping their order.
    ///
    /// A name registered twice keeps its first entry.
    pub fn from_entries(entries: Vec<ToolEntry>) -> Self {
        let mut unique = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            if index.contains_key(entry.name()) {
                warn!("Duplicate tool registration ignored: {}", entry.name());
                continue;
            }
            index.insert(entry.name().to_string(), unique.len());
            unique.push(entry);
        }

        Self {
            entries: unique,
            index,
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Metadata for every tool, in registration order.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool().clone()).collect()
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(ToolEntry::name).collect()
    }

}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn input_schema(registry: &ToolRegistry, name: &str) -> Value {
        let tool = registry.get(name).unwrap().tool();
        Value::Object(tool.input_schema.as_ref().clone())
    }

    fn required(schema: &Value) -> Vec<String> {
        schema["required"]
            .as_array()
            .map(|r| r.iter().filter_map(|v| v.as_str().map(String::from)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_registry_has_seven_unique_tools() {
        let registry = ToolRegistry::new();
        let names = registry.tool_names();
        assert_eq!(names.len(), 7);
        assert_eq!(registry.list_tools().len(), 7);

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 7);

        for name in [
            "ollama_list_models",
            "ollama_generate",
            "ollama_chat",
            "ollama_pull_model",
            "ollama_show_model",
            "ollama_delete_model",
            "ollama_health_check",
        ] {
            assert!(names.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn test_every_tool_has_description() {
        for tool in ToolRegistry::new().list_tools() {
            let description = tool.description.as_deref().unwrap_or_default();
            assert!(!description.is_empty(), "{} has no description", tool.name);
        }
    }

    #[test]
    fn test_generate_schema_requires_model_and_prompt() {
        let registry = ToolRegistry::new();
        let schema = input_schema(&registry, "ollama_generate");
        assert!(schema["properties"]["model"].is_object());
        assert!(schema["properties"]["prompt"].is_object());
        assert!(schema["properties"]["options"].is_object());

        let required = required(&schema);
        assert!(required.contains(&"model".to_string()));
        assert!(required.contains(&"prompt".to_string()));
        assert!(!required.contains(&"stream".to_string()));
        assert!(!required.contains(&"system".to_string()));
    }

    #[test]
    fn test_chat_schema_requires_model_and_messages() {
        let registry = ToolRegistry::new();
        let schema = input_schema(&registry, "ollama_chat");
        assert!(schema["properties"]["messages"].is_object());

        let required = required(&schema);
        assert!(required.contains(&"model".to_string()));
        assert!(required.contains(&"messages".to_string()));
    }

    #[test]
    fn test_model_admin_tools_require_model() {
        let registry = ToolRegistry::new();
        for name in ["ollama_pull_model", "ollama_show_model", "ollama_delete_model"] {
            let schema = input_schema(&registry, name);
            assert_eq!(required(&schema), vec!["model".to_string()], "{}", name);
        }
    }

    #[test]
    fn test_lookup_unknown_tool() {
        assert!(ToolRegistry::new().get("ollama_dance").is_none());
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let registry = ToolRegistry::from_entries(vec![
            HealthCheckTool::entry(),
            ListModelsTool::entry(),
            HealthCheckTool::entry(),
        ]);
        assert_eq!(
            registry.tool_names(),
            vec!["ollama_health_check", "ollama_list_models"]
        );
    }
}
