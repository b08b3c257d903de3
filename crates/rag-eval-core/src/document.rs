//! Retrieved and reranked document shapes

use serde::{Deserialize, Serialize};

/// A retrieved passage. `score` stays empty until the passage has been ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: None,
            score: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// A passage produced by a reranking step. Unlike [`Document`] the score is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankedDocument {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub score: f64,
}

impl RerankedDocument {
    /// Attach a relevance score to a retrieved document
    pub fn scored(document: Document, score: f64) -> Self {
        Self {
            text: document.text,
            id: document.id,
            score,
        }
    }
}

impl From<RerankedDocument> for Document {
    fn from(doc: RerankedDocument) -> Self {
        Self {
            text: doc.text,
            id: doc.id,
            score: Some(doc.score),
        }
    }
}

/// Request payload for a reranking API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<serde_json::Value>,
    pub top_n: usize,
    pub model: String,
}

impl RerankRequest {
    /// Build a request whose document records carry the passage text and id
    pub fn new(query: &str, documents: &[Document], top_n: usize, model: &str) -> Self {
        let documents = documents
            .iter()
            .map(|doc| match &doc.id {
                Some(id) => serde_json::json!({ "text": doc.text, "id": id }),
                None => serde_json::json!({ "text": doc.text }),
            })
            .collect();

        Self {
            query: query.to_string(),
            documents,
            top_n,
            model: model.to_string(),
        }
    }
}
