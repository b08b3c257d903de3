//! Anthropic Messages API client implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

use rag_eval_core::{
    ContentSegment, Error, GenerationConfig, GenerationResult, LLMProvider, Result,
};

use crate::config::AnthropicConfig;

/// Anthropic Messages API client
pub struct AnthropicClient {
    config: AnthropicConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
pub(crate) struct Message<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Option<Vec<ContentSegment>>,
    model: Option<String>,
    usage: Option<Usage>,
}

impl AnthropicClient {
    /// Create a new Anthropic client from configuration
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new Anthropic client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = AnthropicConfig::from_env()?;
        Self::new(config)
    }

    pub(crate) fn build_request<'a>(
        prompt: &'a str,
        config: &'a GenerationConfig,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &config.model_id,
            max_tokens: config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }

    /// Parse a Messages API response body
    pub(crate) fn parse_response(body: &str, requested_model: &str) -> Result<GenerationResult> {
        let response: MessagesResponse =
            serde_json::from_str(body).map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(GenerationResult {
            segments: response.content.unwrap_or_default(),
            model_id: response.model.unwrap_or_else(|| requested_model.to_string()),
            tokens_used: response
                .usage
                .map(|usage| usage.input_tokens + usage.output_tokens),
        })
    }

    /// Perform the actual completion request
    async fn perform_generation(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let request_body = Self::build_request(prompt, config);
        let url = self.config.messages_url();
        tracing::debug!(%url, model = %config.model_id, "sending messages request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(format!(
                    "Anthropic API rejected credentials ({}): {}",
                    status, error_text
                )),
                _ => Error::LLMProvider(format!(
                    "Anthropic API request failed with status {}: {}",
                    status, error_text
                )),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let result = Self::parse_response(&body, &config.model_id)?;
        tracing::debug!(
            model = %result.model_id,
            segments = result.segments.len(),
            tokens = ?result.tokens_used,
            "received messages response"
        );
        Ok(result)
    }
}

#[async_trait]
impl LLMProvider for AnthropicClient {
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult> {
        let generation_future = self.perform_generation(prompt, config);

        match timeout(config.timeout, generation_future).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout("Request timed out".to_string())),
        }
    }

    fn default_config(&self) -> GenerationConfig {
        GenerationConfig {
            max_tokens: self.config.max_tokens,
            timeout: Duration::from_secs(self.config.timeout_secs),
            ..GenerationConfig::default()
        }
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}
