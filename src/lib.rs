//! termchat - terminal chat client library
//!
//! This library provides the pieces of a line-oriented chat client that
//! forwards each user line to a remote language-model endpoint, prints the
//! reply, and keeps a plain-text transcript.
//!
//! # Architecture
//!
//! - `providers`: remote chat abstraction and the Groq HTTP client
//! - `storage`: append-only transcript store
//! - `session`: the interactive read-eval-print loop
//! - `commands`: CLI command handlers
//! - `config`: configuration loading and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use termchat::{ChatSession, Config, TranscriptStore};
//! use termchat::providers::create_provider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let transcript = TranscriptStore::new(&config.history.path);
//!     let mut editor =
//!         rustyline::DefaultEditor::new().map_err(|e| anyhow::anyhow!(e.to_string()))?;
//!
//!     let session = ChatSession::new(provider.as_ref(), &transcript);
//!     session.run(&mut editor, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TermchatError};
pub use providers::{ChatReply, Provider};
pub use session::{ChatSession, LineSource};
pub use storage::TranscriptStore;

#[cfg(test)]
pub mod test_utils;
