//! Evaluation pipeline for the RAG evaluation harness
//!
//! This crate assembles question contexts, optionally reranks the retrieved
//! passages, and drives each question through the configured models.

mod config;
mod engine;
mod reranker;

#[cfg(test)]
mod tests;

pub use config::{RerankConfig, DEFAULT_RERANK_MODEL, DEFAULT_RERANK_URL};
pub use engine::{load_evaluation_set, EvaluationItem, EvaluationRunner};
pub use reranker::HttpReranker;

// Re-export core types for convenience
pub use rag_eval_core::{
    Document, QuestionContext, QuestionResult, RerankedDocument, Reranker, Error, Result,
};
