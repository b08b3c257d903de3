//! Hallucination-detection logging

use async_trait::async_trait;
use colored::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Result;

/// A generation submitted for hallucination detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub user_query: String,
    pub model_output: String,
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallucinationSpan {
    pub text: String,
}

/// Hallucination flagged by the detection service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hallucination {
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub spans: Vec<HallucinationSpan>,
}

/// Treat an explicit `null` list the same as a missing one
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// What the detection service returned for one log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hallucination: Option<Hallucination>,
}

impl DetectionResult {
    pub fn is_hallucination(&self) -> bool {
        self.hallucination.is_some()
    }
}

/// Trait for hallucination-detection services
#[async_trait]
pub trait HallucinationDetector: Send + Sync {
    /// Submit a generation and return the service's verdict
    async fn log(&self, entry: &LogEntry) -> Result<DetectionResult>;

    fn service_name(&self) -> &str;
}

/// Log a generation for hallucination detection and report the verdict.
///
/// Never fails: service errors are printed and yield `None`.
pub async fn evaluate_generation<D>(
    detector: &D,
    question: &str,
    model_output: &str,
    documents: &[String],
) -> Option<DetectionResult>
where
    D: HallucinationDetector + ?Sized,
{
    println!("{} Evaluating generation for hallucinations...", "🔎".cyan());

    let entry = LogEntry {
        user_query: question.to_string(),
        model_output: model_output.to_string(),
        documents: documents.to_vec(),
    };

    match detector.log(&entry).await {
        Ok(result) => {
            report_detection(&result);
            Some(result)
        }
        Err(e) => {
            tracing::warn!(
                service = detector.service_name(),
                error = %e,
                "hallucination logging failed"
            );
            eprintln!(
                "{} Error logging to {}: {}",
                "❌".red(),
                detector.service_name(),
                e
            );
            None
        }
    }
}

fn report_detection(result: &DetectionResult) {
    match &result.hallucination {
        Some(hallucination) => {
            let headline = format!(
                "HALLUCINATION DETECTED: {:.2} confidence",
                hallucination.score
            );
            println!("{} {}", "⚠️".yellow(), headline.yellow().bold());
            if !hallucination.spans.is_empty() {
                println!("Hallucinated content:");
                for span in &hallucination.spans {
                    println!("  - {}", span.text);
                }
            }
        }
        None => println!("{} No hallucinations detected", "✓".green()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_result_parses_spans() {
        let json = r#"{
            "id": "log-1",
            "hallucination": {"score": 0.87, "spans": [{"text": "Yoda is Luke's father"}]}
        }"#;
        let result: DetectionResult = serde_json::from_str(json).unwrap();

        assert!(result.is_hallucination());
        let hallucination = result.hallucination.unwrap();
        assert_eq!(hallucination.score, 0.87);
        assert_eq!(hallucination.spans[0].text, "Yoda is Luke's father");
    }

    #[test]
    fn test_null_spans_still_flag_hallucination() {
        let json = r#"{"hallucination": {"score": 0.8, "spans": null}}"#;
        let result: DetectionResult = serde_json::from_str(json).unwrap();

        assert!(result.is_hallucination());
        assert!(result.hallucination.unwrap().spans.is_empty());
    }

    #[test]
    fn test_detection_result_without_hallucination() {
        let result: DetectionResult = serde_json::from_str(r#"{"id": "log-2"}"#).unwrap();
        assert!(!result.is_hallucination());

        let result: DetectionResult = serde_json::from_str(r#"{"hallucination": null}"#).unwrap();
        assert!(!result.is_hallucination());
    }
}
