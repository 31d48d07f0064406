//! Chat-completion port.

use async_trait::async_trait;

use crate::prompts::Prompt;

/// A text-generation backend that answers one prompt with one reply.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send the prompt and return the raw reply text.
    async fn complete(&self, prompt: &Prompt) -> Result<String, CompletionError>;
}

/// Chat-completion errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    #[error("OpenAI API key not configured")]
    NotConfigured,

    #[error("OpenAI API error: {0}")]
    Upstream(String),

    #[error("Completion request failed: {0}")]
    Transport(String),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}
