//! Per-question context and result types

use serde::{Serialize, Serializer};

use crate::document::Document;
use crate::evaluation::DetectionResult;
use crate::prompt::build_prompt;

/// Separator placed between document texts when assembling the context
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Everything prepared for one question before any model is queried.
///
/// `context` and `prompt` are derived from the question and documents at
/// construction time and never change afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionContext {
    question: String,
    documents: Vec<Document>,
    context: String,
    prompt: String,
    raw_documents: Vec<String>,
}

impl QuestionContext {
    pub fn new(question: impl Into<String>, documents: Vec<Document>) -> Self {
        let question = question.into();
        let raw_documents: Vec<String> = documents.iter().map(|doc| doc.text.clone()).collect();
        let context = raw_documents.join(CONTEXT_SEPARATOR);
        let prompt = build_prompt(&question, &context);

        Self {
            question,
            documents,
            context,
            prompt,
            raw_documents,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn raw_documents(&self) -> &[String] {
        &self.raw_documents
    }
}

/// Response from a single model
#[derive(Debug, Clone, Serialize)]
pub struct ModelResponse {
    pub model: String,
    pub response: String,
    pub evaluation: Option<DetectionResult>,
}

/// Model responses keyed by model id, kept in insertion order.
///
/// Inserting an existing model replaces its response in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponses(Vec<(String, String)>);

impl ModelResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: impl Into<String>, response: impl Into<String>) {
        let model = model.into();
        let response = response.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == model) {
            Some(entry) => entry.1 = response,
            None => self.0.push((model, response)),
        }
    }

    pub fn get(&self, model: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == model)
            .map(|(_, response)| response.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(model, response)| (model.as_str(), response.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ModelResponses {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Final result for a question with all model responses
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResult {
    pub question: String,
    pub documents: Vec<Document>,
    pub model_responses: ModelResponses,
}

impl QuestionResult {
    pub fn new(context: &QuestionContext) -> Self {
        Self {
            question: context.question().to_string(),
            documents: context.documents().to_vec(),
            model_responses: ModelResponses::new(),
        }
    }

    /// Fold one model's response into the result
    pub fn record(&mut self, response: ModelResponse) {
        self.model_responses.insert(response.model, response.response);
    }
}
