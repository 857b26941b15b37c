//! Configuration management for termchat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! The resulting [`Config`] is fixed for the lifetime of the process and is
//! handed to each component's constructor.

use crate::error::{Result, TermchatError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Main configuration structure for termchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote chat endpoint settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Transcript settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Remote chat endpoint configuration
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Chat endpoint URL; the connectivity probe posts to `<endpoint>/connect`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Static bearer token sent as `Authorization: Bearer <api_key>`
    #[serde(default)]
    pub api_key: String,
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
        }
    }
}

// The key must never end up in logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &key)
            .finish()
    }
}

/// Transcript configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Path of the plain-text transcript file
    #[serde(default = "default_history_path")]
    pub path: String,
}

fn default_history_path() -> String {
    "conversation_history.txt".to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration. A missing file is not an
    /// error: defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TermchatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TermchatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(endpoint) = std::env::var("TERMCHAT_ENDPOINT") {
            self.provider.endpoint = endpoint;
        }

        if let Ok(api_key) = std::env::var("TERMCHAT_API_KEY") {
            self.provider.api_key = api_key;
        } else if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            self.provider.api_key = api_key;
        }

        if let Ok(history_path) = std::env::var("TERMCHAT_HISTORY_FILE") {
            self.history.path = history_path;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(endpoint) = &cli.endpoint {
            self.provider.endpoint = endpoint.clone();
        }

        if let Some(history_file) = &cli.history_file {
            self.history.path = history_file.clone();
        }
    }

    /// Validate the configuration
    ///
    /// The API key is not checked here; the provider refuses to start
    /// without one, which keeps the offline history commands usable.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not an absolute http(s) URL or the
    /// transcript path is empty
    pub fn validate(&self) -> Result<()> {
        if self.provider.endpoint.trim().is_empty() {
            return Err(TermchatError::Config("Endpoint cannot be empty".to_string()).into());
        }

        let url = url::Url::parse(&self.provider.endpoint).map_err(|e| {
            TermchatError::Config(format!(
                "Invalid endpoint URL '{}': {}",
                self.provider.endpoint, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TermchatError::Config(format!(
                "Invalid endpoint URL '{}': scheme must be http or https",
                self.provider.endpoint
            ))
            .into());
        }

        if self.history.path.trim().is_empty() {
            return Err(
                TermchatError::Config("history.path cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
