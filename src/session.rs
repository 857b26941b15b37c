//! Interactive chat session
//!
//! Reads one line at a time, answers the built-in commands (`exit`,
//! `history`, `clear history`) locally and forwards everything else to the
//! provider. Every forwarded line and the displayed reply are appended to the
//! transcript. Exactly one request is in flight at any time.

use crate::commands::session_commands::{parse_session_command, SessionCommand};
use crate::error::{Result, TermchatError};
use crate::providers::Provider;
use crate::storage::TranscriptStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;

/// Printed once when the session starts
pub const WELCOME_BANNER: &str =
    "Starting chatbot. Type 'exit' to end the session or 'history' to view past conversations.";

/// Printed when the session ends
pub const FAREWELL: &str = "Ending session. Goodbye!";

/// Prompt shown before each line of input
pub const USER_PROMPT: &str = "You: ";

/// Source of user input lines
pub trait LineSource {
    /// Read one line, showing `prompt` first
    ///
    /// Returns `Ok(None)` when input has ended (EOF or interrupt).
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => {
                if !line.is_empty() {
                    if let Err(e) = self.add_history_entry(line.as_str()) {
                        tracing::debug!("Failed to record input history: {}", e);
                    }
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                Err(TermchatError::Terminal(err.to_string()).into())
            }
        }
    }
}

/// Whether the session loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the next line
    Running,
    /// `exit` was entered or input ended
    Terminated,
}

/// A chat session wired to a provider and a transcript
pub struct ChatSession<'a> {
    provider: &'a dyn Provider,
    transcript: &'a TranscriptStore,
}

impl<'a> ChatSession<'a> {
    /// Create a session
    pub fn new(provider: &'a dyn Provider, transcript: &'a TranscriptStore) -> Self {
        Self {
            provider,
            transcript,
        }
    }

    /// Run until `exit` or end of input
    ///
    /// Prints the banner, probes the endpoint once (the outcome is shown but
    /// does not gate the loop), then processes lines.
    ///
    /// # Errors
    ///
    /// Returns error only if the terminal cannot be read or `out` cannot be
    /// written; provider and transcript failures are reported inline.
    pub async fn run<I, W>(&self, input: &mut I, out: &mut W) -> Result<()>
    where
        I: LineSource,
        W: Write,
    {
        tracing::info!("Starting chat session against {}", self.provider.endpoint());
        writeln!(out, "{}", WELCOME_BANNER)?;

        let probe = self.provider.probe().await;
        writeln!(out, "{}", probe)?;

        let mut state = SessionState::Running;
        let mut turns = 0usize;

        while state == SessionState::Running {
            state = match input.read_line(USER_PROMPT)? {
                Some(line) => {
                    let (next, exchanged) = self.handle_line(&line, out).await?;
                    if exchanged {
                        turns += 1;
                    }
                    next
                }
                None => {
                    tracing::debug!("Input closed");
                    writeln!(out, "{}", FAREWELL)?;
                    SessionState::Terminated
                }
            };
        }

        tracing::info!("Chat session ended after {} turns", turns);
        Ok(())
    }

    /// Process one line of input
    ///
    /// Returns the next state and whether a turn was exchanged with the
    /// provider.
    pub async fn handle_line<W: Write>(
        &self,
        line: &str,
        out: &mut W,
    ) -> Result<(SessionState, bool)> {
        match parse_session_command(line) {
            SessionCommand::Exit => {
                writeln!(out, "{}", FAREWELL)?;
                Ok((SessionState::Terminated, false))
            }
            SessionCommand::History => {
                match self.transcript.read_all() {
                    Ok(history) => writeln!(out, "{}", history)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
                Ok((SessionState::Running, false))
            }
            SessionCommand::ClearHistory => {
                match self.transcript.clear() {
                    Ok(outcome) => writeln!(out, "{}", outcome)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
                Ok((SessionState::Running, false))
            }
            SessionCommand::Query(query) => {
                let reply = self.provider.send_chat(query).await;
                if let Some(failure) = reply.failure() {
                    tracing::warn!("Chat request failed: {:?}", failure);
                }

                let bot_text = reply.to_string();
                writeln!(out, "Bot: {}", bot_text)?;

                if let Err(e) = self.transcript.append(query, &bot_text) {
                    writeln!(out, "Error: {}", e)?;
                }
                Ok((SessionState::Running, true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ChatFailure, ChatReply, ProbeOutcome};
    use crate::storage::NO_HISTORY;
    use crate::test_utils::{ScriptedInput, StubProvider};
    use tempfile::tempdir;

    async fn run_script(
        provider: &StubProvider,
        store: &TranscriptStore,
        lines: &[&str],
    ) -> (String, ScriptedInput) {
        let mut input = ScriptedInput::new(lines);
        let mut out = Vec::new();
        ChatSession::new(provider, store)
            .run(&mut input, &mut out)
            .await
            .unwrap();
        (String::from_utf8(out).unwrap(), input)
    }

    #[tokio::test]
    async fn test_banner_and_probe_printed_first() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new();

        let (output, _) = run_script(&provider, &store, &["exit"]).await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], WELCOME_BANNER);
        assert_eq!(lines[1], "Connected to Groq service successfully.");
        assert_eq!(lines[2], FAREWELL);
        assert_eq!(provider.probe_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_probe_does_not_stop_session() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new()
            .with_probe(ProbeOutcome::Unreachable("connection refused".to_string()))
            .with_reply(ChatReply::Answer("still here".to_string()));

        let (output, _) = run_script(&provider, &store, &["hello", "exit"]).await;
        assert!(output.contains("Failed to connect to Groq service: connection refused"));
        assert!(output.contains("Bot: still here"));
    }

    #[tokio::test]
    async fn test_exit_is_case_insensitive() {
        for word in ["exit", "EXIT", "Exit", "eXiT"] {
            let dir = tempdir().unwrap();
            let store = TranscriptStore::new(dir.path().join("h.txt"));
            let provider = StubProvider::new();

            let (output, input) = run_script(&provider, &store, &[word, "never read"]).await;
            assert!(output.ends_with(&format!("{}\n", FAREWELL)), "word: {}", word);
            assert_eq!(input.remaining(), 1);
            assert!(provider.queries().is_empty());
        }
    }

    #[tokio::test]
    async fn test_exit_with_trailing_space_is_a_query() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new();

        let (output, _) = run_script(&provider, &store, &["exit ", "exit"]).await;
        assert_eq!(provider.queries(), vec!["exit ".to_string()]);
        assert!(output.contains("Bot: "));
    }

    #[tokio::test]
    async fn test_query_is_displayed_and_recorded() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new().with_reply(ChatReply::Answer("hello".to_string()));

        let (output, _) = run_script(&provider, &store, &["hi", "exit"]).await;
        assert!(output.contains("Bot: hello\n"));

        let turns = store.turns().unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].user, "hi");
        assert_eq!(turns[0].bot, "hello");
    }

    #[tokio::test]
    async fn test_failure_is_displayed_and_recorded_like_a_reply() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider =
            StubProvider::new().with_reply(ChatReply::Failure(ChatFailure::Status(500)));

        let (output, _) = run_script(&provider, &store, &["hi", "exit"]).await;
        assert!(output.contains("Bot: Failed to get response from Groq service.\n"));
        assert_eq!(
            store.turns().unwrap()[0].bot,
            "Failed to get response from Groq service."
        );
    }

    #[tokio::test]
    async fn test_empty_line_is_forwarded() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new();

        run_script(&provider, &store, &["", "exit"]).await;
        assert_eq!(provider.queries(), vec![String::new()]);
        assert_eq!(store.turns().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_command_prints_transcript() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new().with_reply(ChatReply::Answer("pong".to_string()));

        let (output, _) =
            run_script(&provider, &store, &["History", "ping", "HISTORY", "exit"]).await;
        let first = output.find(NO_HISTORY).expect("sentinel missing");
        let recorded = output.find("User: ping").expect("recorded turn missing");
        assert!(first < recorded);
        assert_eq!(provider.queries(), vec!["ping".to_string()]);
    }

    #[tokio::test]
    async fn test_clear_history_command() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new();

        let (output, _) = run_script(
            &provider,
            &store,
            &["clear history", "hi", "Clear History", "history", "exit"],
        )
        .await;
        assert!(output.contains("No history to clear."));
        assert!(output.contains("Conversation history cleared."));
        assert!(output.contains(NO_HISTORY));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_end_of_input_terminates() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new();

        let (output, _) = run_script(&provider, &store, &["hi"]).await;
        assert!(output.ends_with(&format!("{}\n", FAREWELL)));
        assert_eq!(provider.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_is_shown_for_each_read() {
        let dir = tempdir().unwrap();
        let store = TranscriptStore::new(dir.path().join("h.txt"));
        let provider = StubProvider::new();

        let (_, input) = run_script(&provider, &store, &["one", "two", "exit"]).await;
        assert_eq!(input.prompts(), &[USER_PROMPT, USER_PROMPT, USER_PROMPT]);
    }

    #[tokio::test]
    async fn test_transcript_failure_does_not_end_session() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened for appending.
        let store = TranscriptStore::new(dir.path());
        let provider = StubProvider::new().with_reply(ChatReply::Answer("ok".to_string()));

        let (output, _) = run_script(&provider, &store, &["hi", "exit"]).await;
        assert!(output.contains("Bot: ok"));
        assert!(output.contains("Error: Transcript error"));
        assert!(output.ends_with(&format!("{}\n", FAREWELL)));
    }
}
