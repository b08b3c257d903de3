//! Sequential evaluation runner

use colored::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use rag_eval_core::{
    evaluate_generation, query_model, Document, HallucinationDetector, LLMProvider, ModelResponse,
    QuestionContext, QuestionResult, Reranker, Result, DEFAULT_MODEL,
};

/// One question of an evaluation set with the passages retrieved for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub question: String,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Load an evaluation set from a JSON file
pub fn load_evaluation_set(path: impl AsRef<Path>) -> Result<Vec<EvaluationItem>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Runs every question through every configured model, one call at a time
pub struct EvaluationRunner {
    provider: Arc<dyn LLMProvider>,
    detector: Option<Arc<dyn HallucinationDetector>>,
    reranker: Option<(Arc<dyn Reranker>, usize)>,
    models: Vec<String>,
}

impl EvaluationRunner {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            detector: None,
            reranker: None,
            models: vec![DEFAULT_MODEL.to_string()],
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        if !models.is_empty() {
            self.models = models;
        }
        self
    }

    pub fn with_detector(mut self, detector: Arc<dyn HallucinationDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>, top_n: usize) -> Self {
        self.reranker = Some((reranker, top_n));
        self
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Rerank (when configured) and assemble the question context.
    ///
    /// A failed rerank keeps the retrieval order.
    pub async fn prepare(&self, question: &str, documents: Vec<Document>) -> QuestionContext {
        let documents = match &self.reranker {
            Some((reranker, top_n)) if !documents.is_empty() => {
                match reranker.rerank(question, &documents, *top_n).await {
                    Ok(ranked) => {
                        println!("{} Reranked {} documents", "📊".cyan(), ranked.len());
                        ranked.into_iter().map(Document::from).collect()
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "reranking failed, keeping retrieval order");
                        eprintln!(
                            "{} Reranking failed: {}. Keeping retrieval order.",
                            "⚠️".yellow(),
                            e
                        );
                        documents
                    }
                }
            }
            _ => documents,
        };

        QuestionContext::new(question, documents)
    }

    /// Query every model for one question and aggregate the answers
    pub async fn evaluate_question(&self, item: EvaluationItem) -> QuestionResult {
        let context = self.prepare(&item.question, item.documents).await;
        let mut result = QuestionResult::new(&context);

        for model in &self.models {
            let response = query_model(self.provider.as_ref(), &context, model).await;

            let evaluation = match &self.detector {
                Some(detector) => {
                    evaluate_generation(
                        detector.as_ref(),
                        context.question(),
                        &response,
                        context.raw_documents(),
                    )
                    .await
                }
                None => None,
            };

            result.record(ModelResponse {
                model: model.clone(),
                response,
                evaluation,
            });
        }

        result
    }

    /// Evaluate the whole set in order
    pub async fn run(&self, items: Vec<EvaluationItem>) -> Vec<QuestionResult> {
        let total = items.len();
        let mut results = Vec::with_capacity(total);

        for (idx, item) in items.into_iter().enumerate() {
            println!(
                "\n{} Question {}/{}: {}",
                "📝".blue(),
                idx + 1,
                total,
                item.question.bold()
            );
            results.push(self.evaluate_question(item).await);
        }

        tracing::info!(
            questions = results.len(),
            models = self.models.len(),
            "evaluation run finished"
        );
        results
    }
}
