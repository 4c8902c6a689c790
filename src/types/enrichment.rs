use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 资料来源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnrichmentSource {
    CompanyWebsite,
    ProductUrl,
    Document,
    Competitor(String),
}

impl Display for EnrichmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichmentSource::CompanyWebsite => write!(f, "company website"),
            EnrichmentSource::ProductUrl => write!(f, "product url"),
            EnrichmentSource::Document => write!(f, "uploaded document"),
            EnrichmentSource::Competitor(url) => write!(f, "competitor {}", url),
        }
    }
}

/// 资料收集过程中的非致命告警，流水线会继续执行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentWarning {
    pub source: EnrichmentSource,
    pub message: String,
}

impl EnrichmentWarning {
    pub fn new(source: EnrichmentSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl Display for EnrichmentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.source, self.message)
    }
}

/// 由Subject派生出的上下文资料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentBundle {
    /// 公司官网检索结果，或 `Company: {company_name}`
    pub company_data: String,
    /// 产品描述、产品链接检索摘要与文档文本的拼接
    pub product_info: String,
    /// `{url}: {snippet}` 列表，空格分隔；没有竞品链接时为空串
    pub competitors_data: String,
    pub warnings: Vec<EnrichmentWarning>,
}
