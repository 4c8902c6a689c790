use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::generator::enrichment::{
    DocumentExtractor, EnrichmentCollector, PdfTextExtractor, TavilySearcher, WebSearcher,
};
use crate::generator::pipeline::PipelineOrchestrator;
use crate::llm::TextGenerator;
use crate::llm::client::LLMClient;

/// 生成器上下文：配置与各项外部能力
#[derive(Clone)]
pub struct GeneratorContext {
    /// 配置
    pub config: Config,
    /// 文本生成能力，用于与AI通信
    pub generator: Arc<dyn TextGenerator>,
    /// 网络搜索能力
    pub searcher: Arc<dyn WebSearcher>,
    /// 文档文本提取能力
    pub extractor: Arc<dyn DocumentExtractor>,
}

impl GeneratorContext {
    /// 创建新的生成器上下文，能力对象全部使用生产实现
    pub fn new(config: Config) -> Result<Self> {
        let generator = Arc::new(LLMClient::new(config.llm.clone())?);
        let searcher = Arc::new(TavilySearcher::new(config.search.clone())?);
        let extractor = Arc::new(PdfTextExtractor);

        Ok(Self::with_capabilities(config, generator, searcher, extractor))
    }

    /// 以指定的能力对象创建上下文
    pub fn with_capabilities(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        searcher: Arc<dyn WebSearcher>,
        extractor: Arc<dyn DocumentExtractor>,
    ) -> Self {
        Self {
            config,
            generator,
            searcher,
            extractor,
        }
    }

    /// 按当前配置组装流水线编排器
    pub fn orchestrator(&self) -> PipelineOrchestrator {
        let collector = EnrichmentCollector::new(
            self.searcher.clone(),
            self.extractor.clone(),
            self.config.enrichment.clone(),
        );
        PipelineOrchestrator::new(collector, self.generator.clone())
    }
}
