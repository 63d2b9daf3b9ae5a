pub mod completions;
pub mod pipeline;
pub mod provider;

pub use completions::CompletionClient;
pub use provider::{CompletionProvider, CompletionRequest, ProviderError, FAILURE_SENTINEL};
