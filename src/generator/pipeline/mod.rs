//! 流水线编排 - 产品摘要 → 分析报告 → 邮件草稿
//!
//! 每个阶段的输出作为下一阶段模板的输入。任一阶段失败即进入Aborted，
//! 已产出的内容保留，失败阶段的产出保持为空。

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::generator::enrichment::EnrichmentCollector;
use crate::generator::prompts::{
    AnalysisReportBindings, Bindings, EmailDraftBindings, ProductSummaryBindings, TemplateBindings,
    TemplateId, render,
};
use crate::llm::{GenerationSettings, TextGenerator};
use crate::types::artifact::{ArtifactKind, PipelineResult};
use crate::types::enrichment::{EnrichmentBundle, EnrichmentWarning};
use crate::types::subject::{Subject, optional_text};

mod error;
mod stage;

pub use error::PipelineError;
pub use stage::PipelineStage;

/// 产出物观察者：每个产出物生成后立即通知，不必等待整条流水线结束
pub trait ArtifactObserver: Send {
    fn on_stage(&mut self, _stage: PipelineStage) {}

    fn on_artifact(&mut self, kind: ArtifactKind, content: &str);
}

/// 不关心中间结果时使用
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ArtifactObserver for NoopObserver {
    fn on_artifact(&mut self, _kind: ArtifactKind, _content: &str) {}
}

/// 一次生成请求：模板 + 变量绑定
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub template: TemplateId,
    pub bindings: Bindings,
}

impl GenerationRequest {
    fn from_bindings<B: TemplateBindings>(bindings: B) -> Self {
        Self {
            template: B::TEMPLATE,
            bindings: bindings.into_bindings(),
        }
    }

    /// 根据当前阶段要产出的内容，从Subject、资料包与前序产出构建请求
    pub fn for_artifact(
        kind: ArtifactKind,
        subject: &Subject,
        bundle: &EnrichmentBundle,
        result: &PipelineResult,
    ) -> Self {
        match kind {
            ArtifactKind::ProductData => Self::from_bindings(ProductSummaryBindings {
                company_data: bundle.company_data.clone(),
                product_name: subject.product_name.clone(),
                product_category: optional_text(&subject.product_category).to_string(),
                product_info: bundle.product_info.clone(),
                value_proposition: optional_text(&subject.value_proposition).to_string(),
            }),
            ArtifactKind::ReportInsights => Self::from_bindings(AnalysisReportBindings {
                company_name: subject.company_name.clone(),
                company_data: bundle.company_data.clone(),
                product_name: subject.product_name.clone(),
                product_category: optional_text(&subject.product_category).to_string(),
                product_data: result.product_data.clone(),
                value_proposition: optional_text(&subject.value_proposition).to_string(),
                competitors_data: bundle.competitors_data.clone(),
                target_market: optional_text(&subject.target_market).to_string(),
                optional: optional_text(&subject.optional_notes).to_string(),
            }),
            ArtifactKind::EmailDraft => Self::from_bindings(EmailDraftBindings {
                target_customer: optional_text(&subject.target_customer).to_string(),
                report: result.report_insights.clone(),
                target_market: optional_text(&subject.target_market).to_string(),
                optional: optional_text(&subject.optional_notes).to_string(),
            }),
        }
    }
}

/// 一次流水线执行的完整记录
#[derive(Debug)]
pub struct PipelineRun {
    pub stage: PipelineStage,
    pub result: PipelineResult,
    pub warnings: Vec<EnrichmentWarning>,
    pub error: Option<PipelineError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            stage: PipelineStage::Idle,
            result: PipelineResult::default(),
            warnings: vec![],
            error: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    fn enter(&mut self, stage: PipelineStage, observer: &mut dyn ArtifactObserver) {
        tracing::debug!(from = %self.stage, to = %stage, "流水线状态切换");
        self.stage = stage;
        observer.on_stage(stage);
    }

    fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn is_done(&self) -> bool {
        self.stage == PipelineStage::Done
    }
}

/// 流水线编排器。只持有不可变的能力对象，模型与温度按请求传入。
#[derive(Clone)]
pub struct PipelineOrchestrator {
    collector: EnrichmentCollector,
    generator: Arc<dyn TextGenerator>,
}

impl PipelineOrchestrator {
    pub fn new(collector: EnrichmentCollector, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            collector,
            generator,
        }
    }

    pub async fn run(&self, subject: &Subject, settings: &GenerationSettings) -> PipelineRun {
        self.run_with_observer(subject, settings, &mut NoopObserver)
            .await
    }

    pub async fn run_with_observer(
        &self,
        subject: &Subject,
        settings: &GenerationSettings,
        observer: &mut dyn ArtifactObserver,
    ) -> PipelineRun {
        let mut run = PipelineRun::new();

        let missing = subject.missing_required_fields();
        if !missing.is_empty() {
            let err = PipelineError::missing_fields(&missing);
            tracing::error!("❌ {}", err);
            run.error = Some(err);
            return run.finish();
        }

        tracing::info!(
            company = %subject.company_name,
            product = %subject.product_name,
            model = settings.model(),
            "🚀 开始执行销售洞察流水线..."
        );

        run.enter(PipelineStage::Collecting, observer);
        let started = Instant::now();
        let bundle = self.collector.collect(subject).await;
        run.warnings = bundle.warnings.clone();
        tracing::info!(
            warnings = run.warnings.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✓ 资料收集完成"
        );

        let mut stage = PipelineStage::Collecting.next();
        while let Some(kind) = stage.artifact() {
            run.enter(stage, observer);
            let started = Instant::now();
            let request = GenerationRequest::for_artifact(kind, subject, &bundle, &run.result);

            match self.execute(stage, &request, settings).await {
                Ok(text) => {
                    tracing::info!(
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "✅ {} 生成完成",
                        kind
                    );
                    run.result.set(kind, text);
                    observer.on_artifact(kind, run.result.get(kind));
                    stage = stage.next();
                }
                Err(err) => {
                    tracing::error!("❌ {}", err);
                    run.error = Some(err);
                    stage = PipelineStage::Aborted;
                }
            }
        }

        run.enter(stage, observer);
        run.finish()
    }

    /// 渲染并生成单个阶段的产出
    async fn execute(
        &self,
        stage: PipelineStage,
        request: &GenerationRequest,
        settings: &GenerationSettings,
    ) -> Result<String, PipelineError> {
        let prompt = render(request.template, &request.bindings)
            .map_err(|source| PipelineError::TemplateBinding { stage, source })?;

        let text = self
            .generator
            .generate(&prompt, settings)
            .await
            .map_err(|source| PipelineError::Generation { stage, source })?;

        if text.trim().is_empty() {
            return Err(PipelineError::Generation {
                stage,
                source: anyhow::anyhow!("model returned an empty response"),
            });
        }
        Ok(text)
    }
}
