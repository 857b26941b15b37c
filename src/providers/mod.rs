//! Provider module for termchat
//!
//! This module contains the remote chat abstraction and the Groq HTTP
//! implementation.

pub mod base;
pub mod groq;

pub use base::{
    ChatFailure, ChatReply, ChatRequest, ChatResponseEnvelope, Choice, ChoiceMessage,
    ProbeOutcome, Provider,
};
pub use groq::GroqProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance from configuration
///
/// # Arguments
///
/// * `config` - Provider configuration (endpoint and API key)
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if the API key is missing or the HTTP client cannot be built
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    Ok(Box::new(GroqProvider::new(config.clone())?))
}
