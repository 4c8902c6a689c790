#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::generator::context::GeneratorContext;
    use crate::generator::enrichment::{DocumentExtractor, SearchHit, WebSearcher};
    use crate::generator::pipeline::{ArtifactObserver, PipelineStage};
    use crate::generator::workflow::{ConsoleObserver, TimingScope, execute};
    use crate::llm::{GenerationSettings, TextGenerator};
    use crate::types::artifact::ArtifactKind;
    use crate::types::subject::Subject;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// 第 `fail_at` 次调用返回错误，其余回显调用序号
    struct CountingGenerator {
        calls: AtomicUsize,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate(&self, _prompt: &str, _settings: &GenerationSettings) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_at == Some(call) {
                return Err(anyhow!("connection refused"));
            }
            Ok(format!("output {}", call))
        }
    }

    struct EmptySearcher;

    #[async_trait]
    impl WebSearcher for EmptySearcher {
        async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchHit>> {
            Ok(vec![])
        }
    }

    struct NoDocument;

    impl DocumentExtractor for NoDocument {
        fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
            Err(anyhow!("no document expected"))
        }
    }

    fn create_test_context(fail_at: Option<usize>) -> (GeneratorContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            output_path: temp_dir.path().join("output"),
            ..Default::default()
        };

        let context = GeneratorContext::with_capabilities(
            config,
            Arc::new(CountingGenerator {
                calls: AtomicUsize::new(0),
                fail_at,
            }),
            Arc::new(EmptySearcher),
            Arc::new(NoDocument),
        );
        (context, temp_dir)
    }

    fn subject() -> Subject {
        Subject {
            company_name: "Acme".to_string(),
            product_name: "Widget".to_string(),
            ..Default::default()
        }
    }

    fn settings() -> GenerationSettings {
        GenerationSettings::new("llama3-8b-8192", 0.5).unwrap()
    }

    #[tokio::test]
    async fn test_execute_saves_all_artifacts() {
        let (context, temp_dir) = create_test_context(None);

        let run = execute(&context, &subject(), &settings()).await.unwrap();
        assert_eq!(run.stage, PipelineStage::Done);

        let output_dir = temp_dir.path().join("output");
        for (kind, expected) in ArtifactKind::ALL.iter().zip(["output 1", "output 2", "output 3"]) {
            let path = output_dir.join(kind.file_name("Widget"));
            assert_eq!(std::fs::read_to_string(path).unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_execute_keeps_partial_output_on_abort() {
        let (context, temp_dir) = create_test_context(Some(2));

        let run = execute(&context, &subject(), &settings()).await.unwrap();
        assert_eq!(run.stage, PipelineStage::Aborted);
        assert!(run.error.is_some());

        let output_dir = temp_dir.path().join("output");
        assert!(output_dir.join("Widget Product Data.txt").exists());
        assert!(!output_dir.join("Widget Report Insights.txt").exists());
        assert!(!output_dir.join("Widget Email Draft.txt").exists());
    }

    #[tokio::test]
    async fn test_aborted_rerun_leaves_no_earlier_report() {
        let (context, temp_dir) = create_test_context(None);
        execute(&context, &subject(), &settings()).await.unwrap();

        let failing = GeneratorContext::with_capabilities(
            context.config.clone(),
            Arc::new(CountingGenerator {
                calls: AtomicUsize::new(0),
                fail_at: Some(2),
            }),
            Arc::new(EmptySearcher),
            Arc::new(NoDocument),
        );
        let run = execute(&failing, &subject(), &settings()).await.unwrap();
        assert_eq!(run.stage, PipelineStage::Aborted);

        let output_dir = temp_dir.path().join("output");
        assert_eq!(
            std::fs::read_to_string(output_dir.join("Widget Product Data.txt")).unwrap(),
            "output 1"
        );
        assert!(!output_dir.join("Widget Report Insights.txt").exists());
        assert!(!output_dir.join("Widget Email Draft.txt").exists());
    }

    #[tokio::test]
    async fn test_invalid_subject_keeps_earlier_output() {
        let (context, temp_dir) = create_test_context(None);
        execute(&context, &subject(), &settings()).await.unwrap();

        let subject = Subject {
            company_name: " ".to_string(),
            ..subject()
        };
        let run = execute(&context, &subject, &settings()).await.unwrap();
        assert_eq!(run.stage, PipelineStage::Idle);

        let output_dir = temp_dir.path().join("output");
        for kind in ArtifactKind::ALL {
            assert!(output_dir.join(kind.file_name("Widget")).exists());
        }
    }

    #[tokio::test]
    async fn test_execute_invalid_subject_writes_nothing() {
        let (context, temp_dir) = create_test_context(None);
        let subject = Subject {
            product_name: String::new(),
            ..subject()
        };

        let run = execute(&context, &subject, &settings()).await.unwrap();
        assert_eq!(run.stage, PipelineStage::Idle);
        assert!(!temp_dir.path().join("output").exists());
    }

    #[test]
    fn test_generator_context_orchestrator_uses_config() {
        let (context, temp_dir) = create_test_context(None);
        assert_eq!(context.config.output_path, temp_dir.path().join("output"));
        assert_eq!(context.config.enrichment.max_parallels, 3);
        let _orchestrator = context.orchestrator();
    }

    #[test]
    fn test_console_observer_prints_artifacts() {
        let mut observer = ConsoleObserver::new(Vec::new());
        observer.on_stage(PipelineStage::ProductGen);
        observer.on_artifact(ArtifactKind::ProductData, "summary text");
        observer.on_stage(PipelineStage::Done);

        let printed = String::from_utf8(observer.into_inner()).unwrap();
        assert!(printed.contains("===== Product Data =====\nsummary text\n"));
    }

    #[test]
    fn test_timing_scope_phases() {
        let mut timing = TimingScope::new();
        timing.start_phase("collecting");
        timing.start_phase("product generation");
        assert!(timing.end_phase().is_some());
        assert!(timing.end_phase().is_none());

        let phases: Vec<_> = timing
            .get_phase_durations()
            .iter()
            .map(|(phase, _)| phase.as_str())
            .collect();
        assert_eq!(phases, vec!["collecting", "product generation"]);

        let report = timing.generate_timing_report();
        assert!(report.contains("总执行时间"));
        assert!(report.contains("- collecting:"));
    }
}
