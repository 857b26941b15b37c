//! Groq provider implementation for termchat
//!
//! Talks to a single HTTP endpoint: an empty `POST <endpoint>/connect` for the
//! connectivity probe and `POST <endpoint>` with `{"content": "..."}` for chat.
//! Every request carries the configured bearer token.

use crate::config::ProviderConfig;
use crate::error::{Result, TermchatError};
use crate::providers::{
    ChatFailure, ChatReply, ChatRequest, ChatResponseEnvelope, ProbeOutcome, Provider,
};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;

/// HTTP provider for a Groq-style chat endpoint
///
/// # Examples
///
/// ```no_run
/// use termchat::config::ProviderConfig;
/// use termchat::providers::{GroqProvider, Provider};
///
/// # async fn example() -> termchat::error::Result<()> {
/// let config = ProviderConfig {
///     endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
///     api_key: "gsk_example".to_string(),
/// };
/// let provider = GroqProvider::new(config)?;
/// let reply = provider.send_chat("Hello!").await;
/// println!("Bot: {}", reply);
/// # Ok(())
/// # }
/// ```
pub struct GroqProvider {
    client: Client,
    config: ProviderConfig,
}

impl GroqProvider {
    /// Create a new provider for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, and
    /// `Config`/`Provider` if the key is not a valid header value or the HTTP
    /// client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use termchat::config::ProviderConfig;
    /// use termchat::providers::GroqProvider;
    ///
    /// let config = ProviderConfig {
    ///     endpoint: "http://localhost:8080/chat".to_string(),
    ///     api_key: "test-key".to_string(),
    /// };
    /// assert!(GroqProvider::new(config).is_ok());
    /// ```
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TermchatError::MissingCredentials(
                "groq (set provider.api_key, TERMCHAT_API_KEY or GROQ_API_KEY)".to_string(),
            )
            .into());
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| {
                TermchatError::Config("API key contains invalid header characters".to_string())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("termchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TermchatError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized Groq provider: endpoint={}", config.endpoint);

        Ok(Self { client, config })
    }

    /// URL of the connectivity probe
    fn connect_url(&self) -> String {
        format!("{}/connect", self.config.endpoint.trim_end_matches('/'))
    }
}

/// Turn a 2xx response body into a reply
///
/// A body that decodes but carries no first choice content yields
/// [`ChatFailure::EmptyResponse`]; a body that does not decode at all is a
/// communication failure.
pub(crate) fn reply_from_body(body: &str) -> ChatReply {
    match serde_json::from_str::<ChatResponseEnvelope>(body) {
        Ok(envelope) => match envelope.first_content() {
            Some(content) => ChatReply::Answer(content.to_string()),
            None => {
                tracing::warn!("Groq response contained no choices");
                ChatFailure::EmptyResponse.into()
            }
        },
        Err(e) => {
            tracing::error!("Failed to parse Groq response: {}", e);
            ChatFailure::Communication(e.to_string()).into()
        }
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn probe(&self) -> ProbeOutcome {
        let url = self.connect_url();
        tracing::debug!("Probing Groq endpoint: {}", url);

        match self.client.post(&url).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Connected,
            Ok(response) => {
                let status = response.status();
                tracing::warn!("Groq connectivity probe returned {}", status);
                ProbeOutcome::Rejected(status.as_u16())
            }
            Err(e) => {
                tracing::warn!("Groq connectivity probe failed: {}", e);
                ProbeOutcome::Unreachable(e.to_string())
            }
        }
    }

    async fn send_chat(&self, query: &str) -> ChatReply {
        tracing::debug!("Sending Groq request: {} bytes", query.len());

        let response = match self
            .client
            .post(&self.config.endpoint)
            .json(&ChatRequest { content: query })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to reach Groq endpoint: {}", e);
                return ChatFailure::Communication(e.to_string()).into();
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq returned error {}: {}", status, error_text);
            return ChatFailure::Status(status.as_u16()).into();
        }

        match response.text().await {
            Ok(body) => reply_from_body(&body),
            Err(e) => {
                tracing::error!("Failed to read Groq response body: {}", e);
                ChatFailure::Communication(e.to_string()).into()
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
