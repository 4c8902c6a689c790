use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::pipeline::{ArtifactObserver, PipelineRun, PipelineStage};
use crate::llm::GenerationSettings;
use crate::types::artifact::ArtifactKind;
use crate::types::subject::Subject;

use anyhow::Result;
use std::io::Write;
use std::time::{Duration, Instant};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    current_phase: Option<(String, Instant)>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            current_phase: None,
            phase_durations: vec![],
        }
    }

    /// 开始一个新的阶段计时，同时结束上一个阶段
    pub fn start_phase(&mut self, phase_name: &str) {
        self.end_phase();
        self.current_phase = Some((phase_name.to_string(), Instant::now()));
    }

    /// 结束当前阶段的计时
    pub fn end_phase(&mut self) -> Option<Duration> {
        let (phase_name, start_time) = self.current_phase.take()?;
        let duration = start_time.elapsed();
        self.phase_durations.push((phase_name, duration));
        Some(duration)
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取所有阶段的执行时间，按开始顺序
    pub fn get_phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 控制台观察者：产出物一生成就输出，同时记录各阶段耗时
pub struct ConsoleObserver<W: Write + Send> {
    out: W,
    timing: TimingScope,
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            timing: TimingScope::new(),
        }
    }

    pub fn timing(&self) -> &TimingScope {
        &self.timing
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ArtifactObserver for ConsoleObserver<W> {
    fn on_stage(&mut self, stage: PipelineStage) {
        if stage.is_terminal() {
            self.timing.end_phase();
        } else {
            self.timing.start_phase(&stage.to_string());
        }
    }

    fn on_artifact(&mut self, kind: ArtifactKind, content: &str) {
        // 输出失败不影响流水线
        if let Err(e) = writeln!(self.out, "\n===== {} =====\n{}\n", kind, content) {
            tracing::warn!("⚠️ 无法输出 {}: {}", kind, e);
        }
    }
}

/// 启动销售洞察工作流
pub async fn launch(
    config: &Config,
    subject: &Subject,
    settings: &GenerationSettings,
) -> Result<PipelineRun> {
    let context = GeneratorContext::new(config.clone())?;
    execute(&context, subject, settings).await
}

/// 在给定上下文中执行流水线并保存已产出的内容
pub async fn execute(
    context: &GeneratorContext,
    subject: &Subject,
    settings: &GenerationSettings,
) -> Result<PipelineRun> {
    let mut observer = ConsoleObserver::new(std::io::stdout());
    let run = context
        .orchestrator()
        .run_with_observer(subject, settings, &mut observer)
        .await;

    // 未启动的流水线不触碰输出目录
    if run.stage == PipelineStage::Idle {
        return Ok(run);
    }

    tracing::info!("\n{}", observer.timing().generate_timing_report());

    if !run.warnings.is_empty() {
        tracing::warn!("⚠️ 资料收集过程中出现 {} 条告警", run.warnings.len());
    }

    crate::generator::outlet::save(context, &subject.product_name, &run.result).await?;

    match run.stage {
        PipelineStage::Done => tracing::info!("🎉 销售洞察生成完成"),
        PipelineStage::Aborted => tracing::error!("❌ 流水线已中止，只保留了本次已产出的内容"),
        _ => {}
    }

    Ok(run)
}

// Include tests
#[cfg(test)]
mod tests;
