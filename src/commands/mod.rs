/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `chat`: Interactive chat session
- `connect`: One-off connectivity probe
- `history`: Transcript inspection and cleanup

The handlers only wire configuration into the library components
(providers, storage and the session loop).
*/

use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;
use crate::storage::TranscriptStore;

// Built-in commands recognized inside a chat session
pub mod session_commands;

// Transcript commands
pub mod history;

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Builds the provider and transcript from configuration and runs the
    //! session on a rustyline editor, writing to stdout.

    use super::*;
    use crate::error::TermchatError;
    use crate::session::ChatSession;
    use rustyline::DefaultEditor;

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be created (for example, no API
    /// key) or the terminal cannot be read
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let provider = create_provider(&config.provider)?;
        let transcript = TranscriptStore::new(&config.history.path);
        tracing::debug!("Recording transcript to {}", transcript.path().display());

        let mut rl =
            DefaultEditor::new().map_err(|e| TermchatError::Terminal(e.to_string()))?;
        let mut stdout = std::io::stdout();

        let session = ChatSession::new(provider.as_ref(), &transcript);
        session.run(&mut rl, &mut stdout).await?;
        Ok(())
    }
}

// Connectivity check handler
pub mod connect {
    //! One-off connectivity probe.

    use super::*;
    use crate::providers::ProbeOutcome;
    use colored::Colorize;

    /// Probe the configured endpoint and print the outcome
    ///
    /// An unreachable endpoint is reported, not returned as an error.
    pub async fn run_connect(config: Config) -> Result<ProbeOutcome> {
        let provider = create_provider(&config.provider)?;
        tracing::info!("Probing {}", provider.endpoint());

        let outcome = provider.probe().await;
        if outcome.is_connected() {
            println!("{}", outcome.to_string().green());
        } else {
            println!("{}", outcome.to_string().red());
        }

        Ok(outcome)
    }
}
