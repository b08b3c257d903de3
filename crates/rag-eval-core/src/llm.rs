//! LLM provider trait and the fail-soft model query

use async_trait::async_trait;
use colored::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::QuestionContext;
use crate::Result;

/// Model queried when none is configured
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Placeholder returned when a response carries no text segments
pub const NO_CONTENT: &str = "No content returned";

/// Configuration for text generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model_id: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL.to_string(),
            max_tokens: 1000,
            timeout: Duration::from_secs(60),
        }
    }
}

/// One block of generated output. Non-text blocks have no `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSegment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ContentSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

/// Result of a text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub segments: Vec<ContentSegment>,
    pub model_id: String,
    pub tokens_used: Option<u32>,
}

impl GenerationResult {
    /// Join the text segments with single spaces, or [`NO_CONTENT`] if there are none
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .filter_map(|segment| segment.text.as_deref())
            .collect();

        if parts.is_empty() {
            NO_CONTENT.to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Trait for LLM providers
///
/// Implementations perform one completion request and report failures as
/// errors. Callers that must never fail go through [`query_model`].
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate text with custom configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<GenerationResult>;

    /// Configuration used when the caller only picks a model
    fn default_config(&self) -> GenerationConfig {
        GenerationConfig::default()
    }

    /// Human readable provider name
    fn provider_name(&self) -> &str;
}

/// Query a specific model with the prepared context.
///
/// Never fails: provider errors come back as `"Error querying {model}: {details}"`.
pub async fn query_model<P>(provider: &P, context: &QuestionContext, model: &str) -> String
where
    P: LLMProvider + ?Sized,
{
    println!(
        "\n{} Querying {} with the reranked context...",
        "🤖".blue(),
        model
    );

    let config = GenerationConfig {
        model_id: model.to_string(),
        ..provider.default_config()
    };

    match provider.generate_with_config(context.prompt(), &config).await {
        Ok(result) => result.text(),
        Err(e) => {
            let message = format!("Error querying {}: {}", model, e);
            tracing::warn!(
                provider = provider.provider_name(),
                model,
                error = %e,
                "model query failed"
            );
            eprintln!("{} {}", "❌".red(), message);
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(segments: Vec<ContentSegment>) -> GenerationResult {
        GenerationResult {
            segments,
            model_id: DEFAULT_MODEL.to_string(),
            tokens_used: None,
        }
    }

    #[test]
    fn test_segments_joined_with_spaces() {
        let result = result_with(vec![
            ContentSegment::text("Darth Vader"),
            ContentSegment::text("is Luke's father."),
        ]);
        assert_eq!(result.text(), "Darth Vader is Luke's father.");
    }

    #[test]
    fn test_non_text_segments_skipped() {
        let result = result_with(vec![
            ContentSegment { kind: Some("tool_use".to_string()), text: None },
            ContentSegment::text("Only text."),
        ]);
        assert_eq!(result.text(), "Only text.");
    }

    #[test]
    fn test_no_segments() {
        assert_eq!(result_with(Vec::new()).text(), NO_CONTENT);
        let only_tools = result_with(vec![ContentSegment {
            kind: Some("tool_use".to_string()),
            text: None,
        }]);
        assert_eq!(only_tools.text(), NO_CONTENT);
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.model_id, DEFAULT_MODEL);
    }
}
