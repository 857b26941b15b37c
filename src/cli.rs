//! Command-line interface definition for termchat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, connectivity checks, and
//! transcript management.

use clap::{Parser, Subcommand};

/// Default location of the YAML configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// termchat - terminal chat client
///
/// Sends each line you type to a remote language-model endpoint, prints the
/// reply, and keeps a plain-text transcript of the conversation.
#[derive(Parser, Debug, Clone)]
#[command(name = "termchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "TERMCHAT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the chat endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Override the transcript file location
    #[arg(long)]
    pub history_file: Option<String>,

    /// Command to execute (defaults to `chat`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for termchat
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Check that the chat endpoint is reachable
    Connect,

    /// Inspect or clear the conversation transcript
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// Transcript management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommand {
    /// Print the raw transcript
    Show,

    /// List recorded turns as a table
    List,

    /// Delete the transcript file
    Clear,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, falling back to `chat` when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some(DEFAULT_CONFIG_PATH.to_string()),
            verbose: false,
            endpoint: None,
            history_file: None,
            command: None,
        }
    }
}
