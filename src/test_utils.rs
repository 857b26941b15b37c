//! Test utilities for termchat
//!
//! This module provides a stub provider and a scripted input source shared
//! by the unit tests.

use crate::error::Result;
use crate::providers::{ChatReply, ProbeOutcome, Provider};
use crate::session::LineSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider that answers from a queue and records what it was asked
///
/// When the queue is empty it echoes the query back as `echo: <query>`.
pub struct StubProvider {
    probe: ProbeOutcome,
    replies: Mutex<VecDeque<ChatReply>>,
    queries: Mutex<Vec<String>>,
    probes: Mutex<usize>,
}

impl StubProvider {
    /// Create a stub whose probe succeeds
    pub fn new() -> Self {
        Self {
            probe: ProbeOutcome::Connected,
            replies: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            probes: Mutex::new(0),
        }
    }

    /// Set the probe outcome
    pub fn with_probe(mut self, probe: ProbeOutcome) -> Self {
        self.probe = probe;
        self
    }

    /// Queue a reply for the next unanswered query
    pub fn with_reply(self, reply: ChatReply) -> Self {
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .push_back(reply);
        self
    }

    /// Queries received so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock poisoned").clone()
    }

    /// Number of probes performed
    pub fn probe_count(&self) -> usize {
        *self.probes.lock().expect("probes lock poisoned")
    }
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn probe(&self) -> ProbeOutcome {
        *self.probes.lock().expect("probes lock poisoned") += 1;
        self.probe.clone()
    }

    async fn send_chat(&self, query: &str) -> ChatReply {
        self.queries
            .lock()
            .expect("queries lock poisoned")
            .push(query.to_string());
        self.replies
            .lock()
            .expect("replies lock poisoned")
            .pop_front()
            .unwrap_or_else(|| ChatReply::Answer(format!("echo: {}", query)))
    }

    fn endpoint(&self) -> &str {
        "stub://chat"
    }
}

/// Input source that replays fixed lines, then reports end of input
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    /// Create an input source from `lines`
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ChatFailure;

    #[tokio::test]
    async fn test_stub_provider_replays_then_echoes() {
        let stub = StubProvider::new().with_reply(ChatFailure::EmptyResponse.into());
        assert_eq!(
            stub.send_chat("first").await,
            ChatReply::Failure(ChatFailure::EmptyResponse)
        );
        assert_eq!(
            stub.send_chat("second").await,
            ChatReply::Answer("echo: second".to_string())
        );
        assert_eq!(stub.queries(), vec!["first", "second"]);
    }

    #[test]
    fn test_scripted_input_ends() {
        let mut input = ScriptedInput::new(&["a"]);
        assert_eq!(input.read_line("> ").unwrap(), Some("a".to_string()));
        assert_eq!(input.read_line("> ").unwrap(), None);
        assert_eq!(input.prompts().len(), 2);
    }
}
