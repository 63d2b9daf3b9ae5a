use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

/// Text handed back to the user whenever a completion can't be produced.
pub const FAILURE_SENTINEL: &str = "Failed to get a response due to an HTTP error.";

/// Body of a single `POST /completions` call. Built fresh per message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Common interface for the hosted completion endpoint.
///
/// Adapters only ever call [`CompletionProvider::fetch`]; `complete` exists so
/// the failure cause stays observable in logs and tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging and error messages.
    fn name(&self) -> &str;

    /// Run one completion for `prompt` and return the trimmed text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Run one completion, never failing: any error is logged and replaced by
    /// [`FAILURE_SENTINEL`].
    async fn fetch(&self, message: &str) -> String {
        match self.complete(message).await {
            Ok(text) => text,
            Err(e) => {
                warn!(provider = %self.name(), error = %e, "completion failed, returning sentinel");
                FAILURE_SENTINEL.to_string()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}
