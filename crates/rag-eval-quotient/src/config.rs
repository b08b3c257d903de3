//! Quotient logger configuration

use rag_eval_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.quotientai.co/api/v1";

/// Session metadata and credentials for the hallucination-detection logger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotientConfig {
    pub api_key: String,
    pub api_url: String,
    pub app_name: String,
    pub environment: String,
    pub tags: BTreeMap<String, String>,
    pub hallucination_detection: bool,
    pub hallucination_detection_sample_rate: f64,
}

impl QuotientConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("QUOTIENT_API_KEY").map_err(|_| {
            Error::Configuration("QUOTIENT_API_KEY environment variable not found".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(api_url) = env::var("QUOTIENT_API_URL") {
            config.api_url = api_url;
        }
        if let Ok(app_name) = env::var("QUOTIENT_APP_NAME") {
            config.app_name = app_name;
        }
        if let Ok(environment) = env::var("QUOTIENT_ENVIRONMENT") {
            config.environment = environment;
        }
        if let Ok(tags) = env::var("QUOTIENT_TAGS") {
            config.tags = parse_tags(&tags)?;
        }
        if let Ok(rate) = env::var("QUOTIENT_SAMPLE_RATE") {
            config.hallucination_detection_sample_rate = rate.parse().map_err(|_| {
                Error::Configuration(format!("QUOTIENT_SAMPLE_RATE is not a number: {}", rate))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            app_name: "star-wars-rag".to_string(),
            environment: "dev".to_string(),
            tags: BTreeMap::from([("feature".to_string(), "rag-evaluation".to_string())]),
            hallucination_detection: true,
            hallucination_detection_sample_rate: 1.0,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Configuration("QUOTIENT_API_KEY is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.hallucination_detection_sample_rate) {
            return Err(Error::Configuration(format!(
                "Hallucination detection sample rate must be within [0, 1], got {}",
                self.hallucination_detection_sample_rate
            )));
        }
        url::Url::parse(&self.api_url).map_err(|e| {
            Error::Configuration(format!("Invalid Quotient API URL '{}': {}", self.api_url, e))
        })?;
        Ok(())
    }

    pub(crate) fn logs_url(&self) -> String {
        format!("{}/logs", self.api_url.trim_end_matches('/'))
    }
}

/// Parse `key=value` pairs separated by commas
fn parse_tags(raw: &str) -> Result<BTreeMap<String, String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| {
                    Error::Configuration(format!("Malformed tag '{}', expected key=value", pair))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let tags = parse_tags("model=claude-sonnet-4-20250514, feature=star-wars").unwrap();
        assert_eq!(tags.get("model").map(String::as_str), Some("claude-sonnet-4-20250514"));
        assert_eq!(tags.get("feature").map(String::as_str), Some("star-wars"));
        assert!(parse_tags("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_tags_rejects_missing_value() {
        assert!(matches!(parse_tags("model"), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_validate_sample_rate() {
        let mut config = QuotientConfig::new("key".to_string());
        assert!(config.validate().is_ok());

        config.hallucination_detection_sample_rate = 1.5;
        assert!(config.validate().is_err());
    }
}
