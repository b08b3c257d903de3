//! Anthropic configuration

use rag_eval_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic Messages API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub api_url: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl AnthropicConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            Error::Configuration("ANTHROPIC_API_KEY environment variable not found".to_string())
        })?;

        let api_url = env::var("ANTHROPIC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_version =
            env::var("ANTHROPIC_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let config = Self {
            api_key,
            api_url,
            api_version,
            ..Self::new(String::new())
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }

    /// Point the client at a different base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("ANTHROPIC_API_KEY is empty".to_string()));
        }
        url::Url::parse(&self.api_url).map_err(|e| {
            Error::Configuration(format!("Invalid Anthropic API URL '{}': {}", self.api_url, e))
        })?;
        Ok(())
    }

    pub(crate) fn messages_url(&self) -> String {
        format!("{}/messages", self.api_url.trim_end_matches('/'))
    }
}
