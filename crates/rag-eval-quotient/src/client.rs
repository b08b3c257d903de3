//! Quotient logging client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use rag_eval_core::{DetectionResult, Error, HallucinationDetector, LogEntry, Result};

use crate::config::QuotientConfig;

/// Logs generations to Quotient and returns its hallucination verdict
pub struct QuotientLogger {
    config: QuotientConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogRequest<'a> {
    pub app_name: &'a str,
    pub environment: &'a str,
    pub tags: &'a BTreeMap<String, String>,
    pub hallucination_detection: bool,
    pub hallucination_detection_sample_rate: f64,
    #[serde(flatten)]
    pub entry: &'a LogEntry,
}

impl QuotientLogger {
    pub fn new(config: QuotientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(QuotientConfig::from_env()?)
    }

    pub(crate) fn build_request<'a>(&'a self, entry: &'a LogEntry) -> LogRequest<'a> {
        LogRequest {
            app_name: &self.config.app_name,
            environment: &self.config.environment,
            tags: &self.config.tags,
            hallucination_detection: self.config.hallucination_detection,
            hallucination_detection_sample_rate: self.config.hallucination_detection_sample_rate,
            entry,
        }
    }

    /// An empty body means the entry was logged without a verdict
    pub(crate) fn parse_response(body: &str) -> Result<DetectionResult> {
        if body.trim().is_empty() {
            return Ok(DetectionResult::default());
        }
        serde_json::from_str(body).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[async_trait]
impl HallucinationDetector for QuotientLogger {
    async fn log(&self, entry: &LogEntry) -> Result<DetectionResult> {
        let url = self.config.logs_url();
        tracing::debug!(%url, app = %self.config.app_name, "logging generation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.build_request(entry))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        match status {
            s if s.is_success() => Self::parse_response(&body),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Authentication(format!(
                "Quotient rejected credentials ({})",
                status
            ))),
            _ => Err(Error::Evaluation(format!(
                "Quotient log request failed with status {}: {}",
                status, body
            ))),
        }
    }

    fn service_name(&self) -> &str {
        "Quotient"
    }
}
