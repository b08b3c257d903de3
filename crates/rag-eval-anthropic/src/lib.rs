//! Anthropic integration for the RAG evaluation harness
//!
//! This crate provides the Anthropic Messages API implementation of the LLMProvider trait.

mod client;
mod config;


pub use client::AnthropicClient;
pub use config::{AnthropicConfig, DEFAULT_API_URL, DEFAULT_API_VERSION};

// Re-export core types for convenience
pub use rag_eval_core::{GenerationConfig, GenerationResult, LLMProvider, Error, Result};
