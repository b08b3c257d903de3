//! Quotient hallucination-detection logging for the RAG evaluation harness
//!
//! This crate provides the Quotient implementation of the HallucinationDetector trait.

mod client;
mod config;


pub use client::QuotientLogger;
pub use config::{QuotientConfig, DEFAULT_API_URL};

// Re-export core types for convenience
pub use rag_eval_core::{DetectionResult, HallucinationDetector, LogEntry, Error, Result};
