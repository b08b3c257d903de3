//! Reranker trait

use async_trait::async_trait;

use crate::document::{Document, RerankedDocument};
use crate::Result;

/// Trait for reranking services
///
/// Returns at most `top_n` documents ordered by descending relevance.
#[async_trait]
pub trait Reranker: Send + Sync {
    async fn rerank(
        &self,
        query: &str,
        documents: &[Document],
        top_n: usize,
    ) -> Result<Vec<RerankedDocument>>;
}
