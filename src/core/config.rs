//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default address of a local Ollama server.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default bound on a single upstream round trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Upstream Ollama connection settings.
    pub ollama: OllamaConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Connection settings for the upstream Ollama API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base address of the Ollama server, e.g. `http://localhost:11434`.
    pub base_url: String,

    /// Timeout applied to each upstream round trip, in seconds.
    pub timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OllamaConfig {
    /// Create a config pointing at the given base address with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "ollama-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            ollama: OllamaConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `OLLAMA_URL` selects the upstream server; everything else is prefixed
    /// with `MCP_`, e.g. `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        if let Ok(url) = std::env::var("OLLAMA_URL") {
            config.ollama.base_url = url;
        }

        if let Ok(raw) = std::env::var("MCP_OLLAMA_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => config.ollama.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_OLLAMA_TIMEOUT_SECS value '{}', using {}s",
                    raw, config.ollama.timeout_secs
                ),
            }
        }

        config.transport = TransportConfig::from_env();

        config
    }

    /// Check that the configuration can be used to start the server.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.ollama.base_url).map_err(|e| {
            Error::config(format!(
                "invalid Ollama base URL '{}': {}",
                self.ollama.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Ollama base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.ollama.timeout_secs == 0 {
            return Err(Error::config("Ollama timeout must be at least one second"));
        }

        Ok(())
    }
}
