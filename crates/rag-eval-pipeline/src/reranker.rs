//! HTTP reranking client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use rag_eval_core::{Document, Error, RerankRequest, RerankedDocument, Reranker, Result};

use crate::config::RerankConfig;

#[derive(Debug, Deserialize)]
pub(crate) struct RerankHit {
    pub index: usize,
    pub relevance_score: f64,
}

#[derive(Debug, Deserialize)]
struct RerankResponse {
    #[serde(default)]
    results: Vec<RerankHit>,
}

/// Reranker backed by a `POST {query, documents, top_n, model}` endpoint
pub struct HttpReranker {
    config: RerankConfig,
    client: Client,
}

impl HttpReranker {
    pub fn new(config: RerankConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(RerankConfig::from_env()?)
    }

    pub fn top_n(&self) -> usize {
        self.config.top_n
    }
}

/// Attach scores to the referenced documents, best first, keeping at most `top_n`
pub(crate) fn apply_rerank_hits(
    documents: &[Document],
    hits: Vec<RerankHit>,
    top_n: usize,
) -> Result<Vec<RerankedDocument>> {
    let mut ranked = hits
        .into_iter()
        .map(|hit| {
            documents
                .get(hit.index)
                .cloned()
                .map(|doc| RerankedDocument::scored(doc, hit.relevance_score))
                .ok_or_else(|| {
                    Error::Reranker(format!(
                        "Reranker returned index {} for {} documents",
                        hit.index,
                        documents.len()
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    Ok(ranked)
}

#[async_trait]
impl Reranker for HttpReranker {
    async fn rerank(
        &self,
        query: &str,
        documents: &[Document],
        top_n: usize,
    ) -> Result<Vec<RerankedDocument>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let top_n = top_n.min(documents.len());
        let request = RerankRequest::new(query, documents, top_n, &self.config.model);
        tracing::debug!(
            url = %self.config.api_url,
            model = %request.model,
            top_n,
            "reranking documents"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Reranker(format!(
                "Rerank request failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: RerankResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        apply_rerank_hits(documents, parsed.results, top_n)
    }
}
