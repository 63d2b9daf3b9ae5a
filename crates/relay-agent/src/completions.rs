use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use relay_core::config::CompletionConfig;

use crate::provider::{CompletionProvider, CompletionRequest, ProviderError};

/// Client for an OpenAI-style legacy `/completions` endpoint (OpenRouter by default).
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Request body for `prompt` using the configured generation parameters.
    pub fn build_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for CompletionClient {
    fn name(&self) -> &str {
        "completions"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = self.build_request(prompt);
        let url = self.endpoint();

        debug!(model = %body.model, url = %url, "sending completion request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "completion API error");
            return Err(ProviderError::Api {
                status,
                message: text,
            });
        }

        let api_resp: ApiResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        parse_response(api_resp)
    }
}

fn parse_response(resp: ApiResponse) -> Result<String, ProviderError> {
    resp.choices
        .into_iter()
        .next()
        .map(|choice| choice.text.trim().to_string())
        .ok_or_else(|| ProviderError::Parse("response contained no choices".to_string()))
}

// Completion API response types (private, deserialization only)

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
}
