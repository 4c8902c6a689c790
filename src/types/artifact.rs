use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 流水线产出物类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    ProductData,
    ReportInsights,
    EmailDraft,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::ProductData,
        ArtifactKind::ReportInsights,
        ArtifactKind::EmailDraft,
    ];

    /// 下载文件名：`{product_name} <kind>.txt`
    pub fn file_name(&self, product_name: &str) -> String {
        let safe_name: String = product_name
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("{} {}.txt", safe_name, self)
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            ArtifactKind::ProductData => "Product Data",
            ArtifactKind::ReportInsights => "Report Insights",
            ArtifactKind::EmailDraft => "Email Draft",
        };
        write!(f, "{}", str)
    }
}

/// 三个产出物，未到达的阶段保持为空
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub product_data: String,
    pub report_insights: String,
    pub email_draft: String,
}

impl PipelineResult {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::ProductData => &self.product_data,
            ArtifactKind::ReportInsights => &self.report_insights,
            ArtifactKind::EmailDraft => &self.email_draft,
        }
    }

    pub fn set(&mut self, kind: ArtifactKind, content: String) {
        match kind {
            ArtifactKind::ProductData => self.product_data = content,
            ArtifactKind::ReportInsights => self.report_insights = content,
            ArtifactKind::EmailDraft => self.email_draft = content,
        }
    }

    /// 已产出（非空）的产出物，按流水线顺序
    pub fn produced(&self) -> Vec<(ArtifactKind, &str)> {
        ArtifactKind::ALL
            .iter()
            .map(|kind| (*kind, self.get(*kind)))
            .filter(|(_, content)| !content.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.produced().is_empty()
    }
}
