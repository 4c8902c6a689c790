use thiserror::Error;

use super::PipelineStage;
use crate::generator::prompts::TemplateBindingError;

/// 流水线错误。资料收集失败不在此列，它们被降级为告警。
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 必填字段缺失，流水线不会启动
    #[error("validation failed: {0}")]
    Validation(String),

    /// 模板变量绑定不完整，当前阶段中止
    #[error("{stage} aborted: {source}")]
    TemplateBinding {
        stage: PipelineStage,
        #[source]
        source: TemplateBindingError,
    },

    /// 生成服务调用失败，不重试
    #[error("{stage} failed: {source}")]
    Generation {
        stage: PipelineStage,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// 必填字段缺失时的校验错误，列出全部缺失字段
    pub fn missing_fields(missing: &[&str]) -> Self {
        PipelineError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        ))
    }

    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Validation(_) => PipelineStage::Idle,
            PipelineError::TemplateBinding { stage, .. } => *stage,
            PipelineError::Generation { stage, .. } => *stage,
        }
    }
}
