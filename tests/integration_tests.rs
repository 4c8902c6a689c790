use std::fs;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use mockito::Matcher;
use tempfile::TempDir;

use sales_insight_rs::config::{Config, SearchConfig};
use sales_insight_rs::generator::context::GeneratorContext;
use sales_insight_rs::generator::enrichment::{PdfTextExtractor, TavilySearcher};
use sales_insight_rs::generator::workflow::execute;
use sales_insight_rs::types::artifact::ArtifactKind;
use sales_insight_rs::types::enrichment::EnrichmentSource;
use sales_insight_rs::{GenerationSettings, PipelineStage, SubjectForm, TextGenerator};

/// 记录收到的提示词；`fail_on` 指定第几次调用失败
struct RecordingGenerator {
    prompts: Mutex<Vec<String>>,
    fail_on: Option<usize>,
}

impl RecordingGenerator {
    fn new(fail_on: Option<usize>) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(vec![]),
            fail_on,
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str, _settings: &GenerationSettings) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        if self.fail_on == Some(prompts.len()) {
            return Err(anyhow!("503 service unavailable"));
        }
        Ok(format!("generated text #{}", prompts.len()))
    }
}

fn create_context(
    server: &mockito::ServerGuard,
    output_dir: &TempDir,
    generator: Arc<RecordingGenerator>,
) -> GeneratorContext {
    let config = Config {
        output_path: output_dir.path().join("reports"),
        search: SearchConfig {
            api_key: "tvly-test".to_string(),
            api_base_url: server.url(),
            ..Default::default()
        },
        ..Default::default()
    };
    let searcher = TavilySearcher::new(config.search.clone()).unwrap();

    GeneratorContext::with_capabilities(
        config,
        generator,
        Arc::new(searcher),
        Arc::new(PdfTextExtractor),
    )
}

fn settings() -> GenerationSettings {
    GenerationSettings::new("llama3-8b-8192", 0.5).unwrap()
}

async fn mock_search(
    server: &mut mockito::ServerGuard,
    query: &str,
    content: &str,
) -> mockito::Mock {
    server
        .mock("POST", "/search")
        .match_body(Matcher::PartialJson(serde_json::json!({ "query": query })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "results": [{ "title": "", "url": query, "content": content }]
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test]
async fn test_acme_widget_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let rival = mock_search(&mut server, "http://rival.com", "Rival sells budget widgets.").await;

    let temp_dir = TempDir::new().unwrap();
    let subject_path = temp_dir.path().join("subject.toml");
    fs::write(
        &subject_path,
        r#"
company_name = "Acme"
company_website = ""
product_name = "Widget"
competitors = "not-a-url, http://rival.com"
target_customer = "Head of Procurement"
"#,
    )
    .unwrap();
    let subject = SubjectForm::from_file(&subject_path)
        .unwrap()
        .into_subject()
        .unwrap();

    let generator = RecordingGenerator::new(None);
    let context = create_context(&server, &temp_dir, generator.clone());
    let run = execute(&context, &subject, &settings()).await.unwrap();

    assert_eq!(run.stage, PipelineStage::Done);
    assert!(run.warnings.is_empty());
    assert!(!run.result.product_data.is_empty());
    assert!(!run.result.report_insights.is_empty());
    assert!(!run.result.email_draft.is_empty());
    rival.assert_async().await;

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("Company: Acme"));
    assert!(prompts[1].contains("http://rival.com: Rival sells budget widgets."));
    assert!(!prompts[1].contains("not-a-url"));
    assert!(prompts[1].contains("generated text #1"));
    assert!(prompts[2].contains("generated text #2"));
    assert!(prompts[2].contains("Head of Procurement"));

    for kind in ArtifactKind::ALL {
        let path = temp_dir.path().join("reports").join(kind.file_name("Widget"));
        assert!(path.exists(), "missing {}", path.display());
    }
}

#[tokio::test]
async fn test_search_outage_degrades_to_fallbacks() {
    let mut server = mockito::Server::new_async().await;
    let _outage = server
        .mock("POST", "/search")
        .with_status(500)
        .with_body("internal error")
        .expect_at_least(1)
        .create_async()
        .await;

    let temp_dir = TempDir::new().unwrap();
    let subject = SubjectForm {
        company_name: Some("Acme".to_string()),
        company_website: Some("https://acme.com".to_string()),
        product_name: Some("Widget".to_string()),
        product_url: Some("https://acme.com/widget".to_string()),
        competitors: Some("https://rival.com".to_string()),
        ..Default::default()
    }
    .into_subject()
    .unwrap();

    let generator = RecordingGenerator::new(None);
    let context = create_context(&server, &temp_dir, generator.clone());
    let run = execute(&context, &subject, &settings()).await.unwrap();

    assert_eq!(run.stage, PipelineStage::Done);
    let sources: Vec<_> = run.warnings.iter().map(|w| w.source.clone()).collect();
    assert_eq!(
        sources,
        vec![
            EnrichmentSource::CompanyWebsite,
            EnrichmentSource::ProductUrl,
            EnrichmentSource::Competitor("https://rival.com".to_string()),
        ]
    );

    let prompts = generator.prompts();
    assert!(prompts[0].contains("Company: Acme"));
    assert!(prompts[0].contains("No additional product information was supplied."));
    assert!(prompts[1].contains("https://rival.com: (no search result available)"));
}

#[tokio::test]
async fn test_generation_outage_keeps_first_artifact() {
    let server = mockito::Server::new_async().await;
    let temp_dir = TempDir::new().unwrap();
    let subject = SubjectForm {
        company_name: Some("Acme".to_string()),
        product_name: Some("Widget".to_string()),
        ..Default::default()
    }
    .into_subject()
    .unwrap();

    let generator = RecordingGenerator::new(Some(2));
    let context = create_context(&server, &temp_dir, generator);
    let run = execute(&context, &subject, &settings()).await.unwrap();

    assert_eq!(run.stage, PipelineStage::Aborted);
    assert_eq!(run.result.product_data, "generated text #1");
    assert!(run.result.report_insights.is_empty());
    assert!(run.result.email_draft.is_empty());
    let err = run.error.unwrap();
    assert_eq!(err.stage(), PipelineStage::AnalysisGen);
    assert!(err.to_string().contains("503 service unavailable"));

    let reports = temp_dir.path().join("reports");
    assert_eq!(
        fs::read_to_string(reports.join("Widget Product Data.txt")).unwrap(),
        "generated text #1"
    );
    assert!(!reports.join("Widget Report Insights.txt").exists());
}

#[tokio::test]
async fn test_corrupt_document_is_a_warning() {
    let server = mockito::Server::new_async().await;
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("brochure.pdf");
    fs::write(&document, b"this is not a pdf").unwrap();

    let subject = SubjectForm {
        company_name: Some("Acme".to_string()),
        product_name: Some("Widget".to_string()),
        product_description: Some("A sturdy widget.".to_string()),
        document: Some(document),
        ..Default::default()
    }
    .into_subject()
    .unwrap();

    let generator = RecordingGenerator::new(None);
    let context = create_context(&server, &temp_dir, generator.clone());
    let run = execute(&context, &subject, &settings()).await.unwrap();

    assert_eq!(run.stage, PipelineStage::Done);
    assert_eq!(run.warnings.len(), 1);
    assert_eq!(run.warnings[0].source, EnrichmentSource::Document);
    assert!(generator.prompts()[0].contains("A sturdy widget."));
}

#[tokio::test]
async fn test_missing_required_fields_make_no_calls() {
    let server = mockito::Server::new_async().await;
    let temp_dir = TempDir::new().unwrap();
    let subject = SubjectForm {
        company_name: Some("Acme".to_string()),
        ..Default::default()
    }
    .into_subject()
    .unwrap();

    let generator = RecordingGenerator::new(None);
    let context = create_context(&server, &temp_dir, generator.clone());
    let run = execute(&context, &subject, &settings()).await.unwrap();

    assert_eq!(run.stage, PipelineStage::Idle);
    assert!(run.result.is_empty());
    assert!(run.error.unwrap().to_string().contains("product_name"));
    assert!(generator.prompts().is_empty());
    assert!(!temp_dir.path().join("reports").exists());
}
