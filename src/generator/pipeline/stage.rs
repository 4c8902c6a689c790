use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::types::artifact::ArtifactKind;

/// 流水线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    Idle,
    Collecting,
    ProductGen,
    AnalysisGen,
    EmailGen,
    Done,
    Aborted,
}

impl PipelineStage {
    /// 正常推进时的下一个状态；终态保持不变
    pub fn next(&self) -> PipelineStage {
        match self {
            PipelineStage::Idle => PipelineStage::Collecting,
            PipelineStage::Collecting => PipelineStage::ProductGen,
            PipelineStage::ProductGen => PipelineStage::AnalysisGen,
            PipelineStage::AnalysisGen => PipelineStage::EmailGen,
            PipelineStage::EmailGen => PipelineStage::Done,
            PipelineStage::Done => PipelineStage::Done,
            PipelineStage::Aborted => PipelineStage::Aborted,
        }
    }

    /// 生成阶段对应的产出物
    pub fn artifact(&self) -> Option<ArtifactKind> {
        match self {
            PipelineStage::ProductGen => Some(ArtifactKind::ProductData),
            PipelineStage::AnalysisGen => Some(ArtifactKind::ReportInsights),
            PipelineStage::EmailGen => Some(ArtifactKind::EmailDraft),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Aborted)
    }
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Collecting => "collecting",
            PipelineStage::ProductGen => "product generation",
            PipelineStage::AnalysisGen => "analysis generation",
            PipelineStage::EmailGen => "email generation",
            PipelineStage::Done => "done",
            PipelineStage::Aborted => "aborted",
        };
        write!(f, "{}", str)
    }
}
