//! Reranking service configuration

use rag_eval_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_RERANK_URL: &str = "https://api.cohere.com/v2/rerank";
pub const DEFAULT_RERANK_MODEL: &str = "rerank-v3.5";

/// Configuration for the HTTP reranker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub top_n: usize,
}

impl RerankConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RERANK_API_KEY").map_err(|_| {
            Error::Configuration("RERANK_API_KEY environment variable not found".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(api_url) = env::var("RERANK_API_URL") {
            config.api_url = api_url;
        }
        if let Ok(model) = env::var("RERANK_MODEL") {
            config.model = model;
        }

        url::Url::parse(&config.api_url).map_err(|e| {
            Error::Configuration(format!("Invalid rerank API URL '{}': {}", config.api_url, e))
        })?;
        Ok(config)
    }

    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_RERANK_URL.to_string(),
            model: DEFAULT_RERANK_MODEL.to_string(),
            top_n: 5,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}
