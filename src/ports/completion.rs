//! Completion Service Port - interface to the LLM provider.
//!
//! Abstracts the third-party completion API behind a single call: the core
//! hands over an ordered message list and receives reply text back, or a
//! transport/provider failure. The core performs no retries, timeouts, or
//! backoff itself; those belong to the adapter or the boundary layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversation::Message;

/// Port for generating assistant replies from a conversation history.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generates a single completion for the given history.
    ///
    /// `messages` is the full prompt context in insertion order, system
    /// preamble first.
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError>;

    /// Returns provider information for logging and diagnostics.
    fn provider_info(&self) -> ProviderInfo;
}

/// Provider name and model, for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "mock").
    pub name: String,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Completion service errors.
///
/// The boundary layer translates all of these into a generic
/// service-unavailable response; upstream detail is logged, never shown to
/// the end user.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// Provider is unavailable or returned a server error.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl CompletionError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
