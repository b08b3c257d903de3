//! Core traits and types for the RAG evaluation harness
//!
//! This crate defines the data model shared across the harness together with
//! the capability-facing interfaces for LLM providers, hallucination detectors
//! and rerankers, so each external service can be swapped or mocked.

pub mod document;
pub mod error;
pub mod evaluation;
pub mod llm;
pub mod prompt;
pub mod rerank;
pub mod types;


pub use document::{Document, RerankRequest, RerankedDocument};
pub use error::{Error, Result};
pub use evaluation::{
    evaluate_generation, DetectionResult, Hallucination, HallucinationDetector, HallucinationSpan,
    LogEntry,
};
pub use llm::{
    query_model, ContentSegment, GenerationConfig, GenerationResult, LLMProvider, DEFAULT_MODEL,
    NO_CONTENT,
};
pub use prompt::build_prompt;
pub use rerank::Reranker;
pub use types::{ModelResponse, ModelResponses, QuestionContext, QuestionResult, CONTEXT_SEPARATOR};
