use crate::error::{Result, TermchatError};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub mod types;
pub use types::{parse_transcript, ChatTurn, TIMESTAMP_FORMAT};

/// Returned by [`TranscriptStore::read_all`] when no transcript exists yet
pub const NO_HISTORY: &str = "No conversation history found.";

/// What [`TranscriptStore::clear`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The transcript file existed and was deleted
    Cleared,
    /// There was no transcript file
    NothingToClear,
}

impl fmt::Display for ClearOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearOutcome::Cleared => f.write_str("Conversation history cleared."),
            ClearOutcome::NothingToClear => f.write_str("No history to clear."),
        }
    }
}

/// Append-only plain-text transcript of a conversation
///
/// Each turn is written as two timestamped lines followed by a blank line:
///
/// ```text
/// 2024-05-01 09:30:00 - User: hi
/// 2024-05-01 09:30:00 - Bot: hello
///
/// ```
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Create a store backed by `path`; nothing is touched on disk until the
    /// first write
    ///
    /// # Examples
    ///
    /// ```
    /// use termchat::storage::TranscriptStore;
    ///
    /// let store = TranscriptStore::new("conversation_history.txt");
    /// assert_eq!(store.path().to_str(), Some("conversation_history.txt"));
    /// ```
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Location of the transcript file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one turn, stamped with the current local time
    ///
    /// The file is opened in append mode for the duration of this call only.
    pub fn append(&self, user: &str, bot: &str) -> Result<ChatTurn> {
        let turn = ChatTurn::new(user, bot);
        self.append_turn(&turn)?;
        Ok(turn)
    }

    /// Record an already-built turn
    pub fn append_turn(&self, turn: &ChatTurn) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    self.transcript_error("create directory for transcript", e)
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.transcript_error("open transcript", e))?;

        file.write_all(turn.to_transcript_entry().as_bytes())
            .map_err(|e| self.transcript_error("write transcript", e))?;

        tracing::debug!("Appended turn to {}", self.path.display());
        Ok(())
    }

    /// Full transcript text, or [`NO_HISTORY`] when the file does not exist
    pub fn read_all(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(NO_HISTORY.to_string()),
            Err(e) => Err(self.transcript_error("read transcript", e).into()),
        }
    }

    /// Recorded turns in append order; empty when the file does not exist
    pub fn turns(&self) -> Result<Vec<ChatTurn>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(parse_transcript(&contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(self.transcript_error("read transcript", e).into()),
        }
    }

    /// Delete the transcript file if there is one
    pub fn clear(&self) -> Result<ClearOutcome> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Deleted transcript {}", self.path.display());
                Ok(ClearOutcome::Cleared)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ClearOutcome::NothingToClear),
            Err(e) => Err(self.transcript_error("delete transcript", e).into()),
        }
    }

    fn transcript_error(&self, action: &str, e: std::io::Error) -> TermchatError {
        tracing::error!("Failed to {} {}: {}", action, self.path.display(), e);
        TermchatError::Transcript(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}
