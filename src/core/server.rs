//! MCP Server implementation.
//!
//! The handler answers `tools/list` and `tools/call` by delegating to the
//! [`Dispatcher`]. Tool calls are routed by hand rather than through an rmcp
//! `ToolRouter` so that unknown tool names also come back as an error
//! envelope instead of a protocol error.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::ollama::OllamaClient;
use crate::domains::tools::{Dispatcher, ToolRegistry};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool dispatcher shared by every session.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the configuration is invalid or the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = OllamaClient::new(&config.ollama)?;
        let dispatcher = Dispatcher::new(Arc::new(ToolRegistry::new()), Arc::new(client));

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// All tools exposed by this server.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.dispatcher.list_tools()
    }

    /// Call a tool by name. Always returns a result; failures set `is_error`.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        self.dispatcher.invoke(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Exposes the Ollama server at {} as tools: list, pull, show and delete models, \
                 generate completions, chat, and check server health.",
                self.dispatcher.client().base_url()
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().into(),
                version: self.version().into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.dispatcher.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        Ok(self.dispatcher.invoke(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_server_exposes_seven_tools() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.list_tools().len(), 7);
        assert_eq!(server.name(), "ollama-mcp-server");
    }

    #[test]
    fn test_server_info_enables_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert!(
            info.instructions
                .unwrap_or_default()
                .contains("http://localhost:11434")
        );
    }

    #[test]
    fn test_server_info_advertises_configured_identity() {
        let mut config = Config::default();
        config.server.name = "custom-name".to_string();
        config.server.version = "9.9.9".to_string();

        let info = McpServer::new(config).unwrap().get_info();
        assert_eq!(info.server_info.name, "custom-name");
        assert_eq!(info.server_info.version, "9.9.9");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = Config::default();
        config.ollama.base_url = "localhost".to_string();
        assert!(matches!(McpServer::new(config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_call_unknown_tool_through_server() {
        let server = McpServer::new(Config::default()).unwrap();
        let result = server.call_tool("ollama_dance", Value::Null).await;
        assert_eq!(result.is_error, Some(true));
    }
}
