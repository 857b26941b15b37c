//! Error types for termchat
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.
//!
//! Chat and probe failures are not errors here: the remote client reports
//! them as values (see [`crate::providers::ChatReply`]) so the session can
//! display them and keep going.

use thiserror::Error;

/// Main error type for termchat operations
#[derive(Error, Debug)]
pub enum TermchatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider construction errors (HTTP client setup, headers)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Transcript file errors other than "not found"
    #[error("Transcript error: {0}")]
    Transcript(String),

    /// Terminal input errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for termchat operations
///
/// Uses `anyhow::Error` so callers can attach context while `TermchatError`
/// stays the concrete error that gets raised.
pub type Result<T> = anyhow::Result<T>;
