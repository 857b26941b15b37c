//! Base provider trait and wire types for termchat
//!
//! This module defines the `Provider` trait implemented by remote chat
//! backends, the request/response envelopes exchanged with the endpoint, and
//! the value types used to report outcomes without raising errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Request body sent to the chat endpoint: `{"content": "<query>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest<'a> {
    /// The user's text, forwarded verbatim
    pub content: &'a str,
}

/// Response envelope returned by the chat endpoint
///
/// Shaped as `{"choices":[{"message":{"content":"..."}}]}`. Every level is
/// optional so that a partial or empty envelope still decodes; callers use
/// [`ChatResponseEnvelope::first_content`] rather than indexing.
///
/// # Examples
///
/// ```
/// use termchat::providers::ChatResponseEnvelope;
///
/// let envelope: ChatResponseEnvelope =
///     serde_json::from_str(r#"{"choices":[{"message":{"content":"Hi!"}}]}"#).unwrap();
/// assert_eq!(envelope.first_content(), Some("Hi!"));
///
/// let empty: ChatResponseEnvelope = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
/// assert_eq!(empty.first_content(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatResponseEnvelope {
    /// Completion choices, in server order
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

/// A single completion choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Choice {
    /// The generated message
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Message payload of a completion choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponseEnvelope {
    /// Text of the first choice's message, if the envelope carries one
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

/// Reason a chat request did not produce an answer
///
/// The `Display` output of each variant is the exact text shown to the user
/// and written to the transcript in place of a reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatFailure {
    /// The endpoint answered 2xx but the envelope had no first choice content
    #[error("No response from Groq service.")]
    EmptyResponse,

    /// The endpoint answered with a non-2xx status
    #[error("Failed to get response from Groq service.")]
    Status(u16),

    /// Transport failure or undecodable body
    #[error("Error communicating with Groq service: {0}")]
    Communication(String),
}

/// Outcome of a single chat request
///
/// Distinguishes a genuine reply from a failure while displaying both the same
/// way, so the session can print and log either one as the bot's turn.
///
/// # Examples
///
/// ```
/// use termchat::providers::{ChatFailure, ChatReply};
///
/// let reply = ChatReply::Answer("Hello".to_string());
/// assert!(reply.is_answer());
/// assert_eq!(reply.to_string(), "Hello");
///
/// let failure = ChatReply::Failure(ChatFailure::Status(503));
/// assert!(!failure.is_answer());
/// assert_eq!(failure.to_string(), "Failed to get response from Groq service.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    /// Text generated by the remote model
    Answer(String),
    /// The request failed; see [`ChatFailure`]
    Failure(ChatFailure),
}

impl ChatReply {
    /// Returns true when the reply came from the model
    pub fn is_answer(&self) -> bool {
        matches!(self, ChatReply::Answer(_))
    }

    /// Returns the failure, if any
    pub fn failure(&self) -> Option<&ChatFailure> {
        match self {
            ChatReply::Answer(_) => None,
            ChatReply::Failure(failure) => Some(failure),
        }
    }
}

impl fmt::Display for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatReply::Answer(text) => f.write_str(text),
            ChatReply::Failure(failure) => write!(f, "{}", failure),
        }
    }
}

impl From<ChatFailure> for ChatReply {
    fn from(failure: ChatFailure) -> Self {
        ChatReply::Failure(failure)
    }
}

/// Outcome of a connectivity probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The endpoint answered the probe with a 2xx status
    Connected,
    /// The endpoint answered with a non-2xx status
    Rejected(u16),
    /// The request never completed
    Unreachable(String),
}

impl ProbeOutcome {
    /// Returns true for [`ProbeOutcome::Connected`]
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeOutcome::Connected)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Connected => f.write_str("Connected to Groq service successfully."),
            ProbeOutcome::Rejected(_) => f.write_str("Failed to connect to Groq service."),
            ProbeOutcome::Unreachable(message) => {
                write!(f, "Failed to connect to Groq service: {}", message)
            }
        }
    }
}

/// Remote chat backend
///
/// Neither operation returns an error: network and protocol failures are
/// reported through [`ProbeOutcome`] and [`ChatReply`] so that a session never
/// ends because the endpoint misbehaved.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Check that the endpoint is reachable
    async fn probe(&self) -> ProbeOutcome;

    /// Send a single-turn chat request
    ///
    /// Only `query` is sent; earlier turns are not replayed to the endpoint.
    ///
    /// # Arguments
    ///
    /// * `query` - The user's text, sent verbatim
    async fn send_chat(&self, query: &str) -> ChatReply;

    /// The endpoint this provider talks to
    fn endpoint(&self) -> &str;
}
