//! Snapshot tests for the evaluation pipeline

#[cfg(test)]
mod snapshot_tests {
    use crate::{load_evaluation_set, EvaluationItem, EvaluationRunner};
    use async_trait::async_trait;
    use insta::assert_yaml_snapshot;
    use rag_eval_core::{
        ContentSegment, DetectionResult, Document, Error, GenerationConfig, GenerationResult,
        HallucinationDetector, LLMProvider, LogEntry, RerankedDocument, Reranker, Result,
    };
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    /// Answers with the model id and the number of documents in the prompt
    struct EchoProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LLMProvider for EchoProvider {
        async fn generate_with_config(
            &self,
            prompt: &str,
            config: &GenerationConfig,
        ) -> Result<GenerationResult> {
            self.calls.lock().unwrap().push(config.model_id.clone());
            if config.model_id == "broken-model" {
                return Err(Error::Network("connection reset".to_string()));
            }
            let mentions_vader = prompt.contains("Vader");
            Ok(GenerationResult {
                segments: vec![
                    ContentSegment::text(format!("{} answers", config.model_id)),
                    ContentSegment::text(format!("with vader {}.", mentions_vader)),
                ],
                model_id: config.model_id.clone(),
                tokens_used: None,
            })
        }

        fn provider_name(&self) -> &str {
            "echo"
        }
    }

    struct CountingDetector {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HallucinationDetector for CountingDetector {
        async fn log(&self, _entry: &LogEntry) -> Result<DetectionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Evaluation("service unavailable".to_string()))
        }

        fn service_name(&self) -> &str {
            "counting"
        }
    }

    /// Scores documents by reversed position
    struct ReverseReranker;

    #[async_trait]
    impl Reranker for ReverseReranker {
        async fn rerank(
            &self,
            _query: &str,
            documents: &[Document],
            top_n: usize,
        ) -> Result<Vec<RerankedDocument>> {
            Ok(documents
                .iter()
                .rev()
                .take(top_n)
                .enumerate()
                .map(|(i, doc)| RerankedDocument::scored(doc.clone(), 1.0 / (i as f64 + 1.0)))
                .collect())
        }
    }

    struct FailingReranker;

    #[async_trait]
    impl Reranker for FailingReranker {
        async fn rerank(&self, _: &str, _: &[Document], _: usize) -> Result<Vec<RerankedDocument>> {
            Err(Error::Reranker("quota exceeded".to_string()))
        }
    }

    fn echo() -> Arc<EchoProvider> {
        Arc::new(EchoProvider { calls: Mutex::new(Vec::new()) })
    }

    fn items() -> Vec<EvaluationItem> {
        vec![
            EvaluationItem {
                question: "Who is Luke's father?".to_string(),
                documents: vec![
                    Document::new("Vader is Luke's father."),
                    Document::new("Leia is Luke's sister."),
                ],
            },
            EvaluationItem {
                question: "Who shot first?".to_string(),
                documents: vec![Document::new("Han shot first.")],
            },
        ]
    }

    #[tokio::test]
    async fn test_run_aggregates_in_order() {
        let provider = echo();
        let detector = Arc::new(CountingDetector { calls: AtomicUsize::new(0) });
        let runner = EvaluationRunner::new(provider.clone())
            .with_models(vec!["model-b".to_string(), "anthropic/model-a".to_string()])
            .with_detector(detector.clone());

        let results = runner.run(items()).await;

        assert_eq!(detector.calls.load(Ordering::SeqCst), 4);
        assert_eq!(
            *provider.calls.lock().unwrap(),
            vec!["model-b", "anthropic/model-a", "model-b", "anthropic/model-a"]
        );
        assert_yaml_snapshot!(results, @r###"
        - question: "Who is Luke's father?"
          documents:
            - text: "Vader is Luke's father."
            - text: "Leia is Luke's sister."
          model_responses:
            model-b: model-b answers with vader true.
            anthropic/model-a: anthropic/model-a answers with vader true.
        - question: Who shot first?
          documents:
            - text: Han shot first.
          model_responses:
            model-b: model-b answers with vader false.
            anthropic/model-a: anthropic/model-a answers with vader false.
        "###);
    }

    #[tokio::test]
    async fn test_failed_model_does_not_abort_run() {
        let runner = EvaluationRunner::new(echo())
            .with_models(vec!["broken-model".to_string(), "model-a".to_string()]);

        let results = runner.run(items()).await;

        assert_eq!(results.len(), 2);
        for result in &results {
            let broken = result.model_responses.get("broken-model").unwrap();
            assert!(broken.starts_with("Error querying broken-model: "));
            assert!(result.model_responses.get("model-a").is_some());
        }
    }

    #[tokio::test]
    async fn test_repeated_model_last_write_wins() {
        let runner = EvaluationRunner::new(echo())
            .with_models(vec!["model-a".to_string(), "model-a".to_string()]);

        let results = runner.run(items()).await;
        assert_eq!(results[0].model_responses.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_model_list_keeps_default() {
        let runner = EvaluationRunner::new(echo()).with_models(Vec::new());
        assert_eq!(runner.models(), ["claude-sonnet-4-20250514"]);
    }

    #[tokio::test]
    async fn test_reranker_reorders_context() {
        let runner = EvaluationRunner::new(echo()).with_reranker(Arc::new(ReverseReranker), 5);
        let item = items().remove(0);

        let ctx = runner.prepare(&item.question, item.documents).await;

        assert_eq!(ctx.raw_documents(), ["Leia is Luke's sister.", "Vader is Luke's father."]);
        assert_eq!(ctx.documents()[0].score, Some(1.0));
        assert_eq!(ctx.documents()[1].score, Some(0.5));
    }

    #[tokio::test]
    async fn test_failed_rerank_keeps_retrieval_order() {
        let runner = EvaluationRunner::new(echo()).with_reranker(Arc::new(FailingReranker), 5);
        let item = items().remove(0);

        let ctx = runner.prepare(&item.question, item.documents).await;

        assert_eq!(ctx.raw_documents(), ["Vader is Luke's father.", "Leia is Luke's sister."]);
        assert!(ctx.documents().iter().all(|doc| doc.score.is_none()));
    }

    #[test]
    fn test_load_evaluation_set() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{
                    "question": "Who is Luke's father?",
                    "documents": [
                        {{"text": "Vader is Luke's father.", "id": "ep5-1", "score": 0.82}}
                    ]
                }},
                {{"question": "No passages?"}}
            ]"#
        )
        .unwrap();

        let set = load_evaluation_set(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].documents[0].id.as_deref(), Some("ep5-1"));
        assert_eq!(set[0].documents[0].score, Some(0.82));
        assert!(set[1].documents.is_empty());
    }

    #[test]
    fn test_load_evaluation_set_missing_file() {
        let err = load_evaluation_set("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
