//! 资料收集 - 从网络搜索与上传文档中为Subject汇集上下文
//!
//! 所有外部调用的失败都在这里被降级为告警，输出字段总是有确定的回退值。

use std::sync::Arc;

use crate::config::EnrichmentConfig;
use crate::types::enrichment::{EnrichmentBundle, EnrichmentSource, EnrichmentWarning};
use crate::types::subject::{Subject, optional_text};
use crate::utils::threads::do_parallel_with_limit;
use crate::utils::urls::{extract_urls, parse_web_url};

pub mod document;
pub mod searcher;

pub use document::{DocumentExtractor, PdfTextExtractor};
pub use searcher::{SearchHit, TavilySearcher, WebSearcher};

/// 没有任何产品资料时的回退文本
pub const NO_PRODUCT_INFO: &str = "No additional product information was supplied.";

/// 竞品检索失败或无结果时的摘要
pub const NO_SEARCH_RESULT: &str = "(no search result available)";

/// 公司资料的回退文本
pub fn company_fallback(company_name: &str) -> String {
    format!("Company: {}", company_name)
}

type Collected = (String, Vec<EnrichmentWarning>);

/// 资料收集器
#[derive(Clone)]
pub struct EnrichmentCollector {
    searcher: Arc<dyn WebSearcher>,
    extractor: Arc<dyn DocumentExtractor>,
    config: EnrichmentConfig,
}

impl EnrichmentCollector {
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        extractor: Arc<dyn DocumentExtractor>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            searcher,
            extractor,
            config,
        }
    }

    /// 收集公司、产品与竞品资料；三路相互独立，全部完成后才返回
    pub async fn collect(&self, subject: &Subject) -> EnrichmentBundle {
        let (company, product, competitors) = tokio::join!(
            self.collect_company_data(subject),
            self.collect_product_info(subject),
            self.collect_competitors_data(subject),
        );

        let (company_data, mut warnings) = company;
        let (product_info, product_warnings) = product;
        let (competitors_data, competitor_warnings) = competitors;
        warnings.extend(product_warnings);
        warnings.extend(competitor_warnings);

        for warning in &warnings {
            tracing::warn!(source = %warning.source, "⚠️ {}", warning.message);
        }

        EnrichmentBundle {
            company_data,
            product_info,
            competitors_data,
            warnings,
        }
    }

    async fn collect_company_data(&self, subject: &Subject) -> Collected {
        let fallback = company_fallback(&subject.company_name);
        let website = optional_text(&subject.company_website);
        if website.is_empty() {
            return (fallback, vec![]);
        }

        if parse_web_url(website).is_none() {
            let warning = EnrichmentWarning::new(
                EnrichmentSource::CompanyWebsite,
                format!(
                    "`{}` is not a well-formed URL, using the company name only",
                    website
                ),
            );
            return (fallback, vec![warning]);
        }

        let top_k = self.config.company_top_k.max(1);
        match self.searcher.search(website, top_k).await {
            Ok(hits) => {
                let text = hits
                    .iter()
                    .take(top_k)
                    .map(|hit| hit.content.trim())
                    .filter(|content| !content.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");
                if text.is_empty() {
                    let warning = EnrichmentWarning::new(
                        EnrichmentSource::CompanyWebsite,
                        format!("no search results for `{}`", website),
                    );
                    (fallback, vec![warning])
                } else {
                    (text, vec![])
                }
            }
            Err(e) => {
                let warning = EnrichmentWarning::new(
                    EnrichmentSource::CompanyWebsite,
                    format!("search for `{}` failed: {}", website, e),
                );
                (fallback, vec![warning])
            }
        }
    }

    async fn collect_product_info(&self, subject: &Subject) -> Collected {
        let mut parts = vec![];
        let mut warnings = vec![];

        let description = optional_text(&subject.product_description);
        if !description.is_empty() {
            parts.push(description.to_string());
        }

        let product_url = optional_text(&subject.product_url);
        if !product_url.is_empty() && parse_web_url(product_url).is_none() {
            warnings.push(EnrichmentWarning::new(
                EnrichmentSource::ProductUrl,
                format!("`{}` is not a well-formed URL, skipped", product_url),
            ));
        } else if !product_url.is_empty() {
            match self.search_snippet(product_url).await {
                Ok(Some(snippet)) => parts.push(snippet),
                Ok(None) => warnings.push(EnrichmentWarning::new(
                    EnrichmentSource::ProductUrl,
                    format!("no search results for `{}`", product_url),
                )),
                Err(message) => warnings.push(EnrichmentWarning::new(
                    EnrichmentSource::ProductUrl,
                    message,
                )),
            }
        }

        if let Some(document) = &subject.uploaded_document {
            let extractor = self.extractor.clone();
            let bytes = document.bytes.clone();
            let extracted =
                tokio::task::spawn_blocking(move || extractor.extract_pages(&bytes)).await;

            match extracted {
                Ok(Ok(pages)) => {
                    let text = pages
                        .iter()
                        .map(|page| page.trim())
                        .filter(|page| !page.is_empty())
                        .collect::<Vec<_>>()
                        .join("\n");
                    if text.is_empty() {
                        warnings.push(EnrichmentWarning::new(
                            EnrichmentSource::Document,
                            format!("`{}` contains no extractable text", document.file_name),
                        ));
                    } else {
                        parts.push(text);
                    }
                }
                Ok(Err(e)) => warnings.push(EnrichmentWarning::new(
                    EnrichmentSource::Document,
                    format!("text extraction from `{}` failed: {:#}", document.file_name, e),
                )),
                Err(e) => warnings.push(EnrichmentWarning::new(
                    EnrichmentSource::Document,
                    format!("text extraction from `{}` aborted: {}", document.file_name, e),
                )),
            }
        }

        if parts.is_empty() {
            (NO_PRODUCT_INFO.to_string(), warnings)
        } else {
            (parts.join("\n\n"), warnings)
        }
    }

    async fn collect_competitors_data(&self, subject: &Subject) -> Collected {
        let urls = extract_urls(optional_text(&subject.competitors));
        if urls.is_empty() {
            return (String::new(), vec![]);
        }

        tracing::debug!(
            count = urls.len(),
            max_parallels = self.config.max_parallels,
            "检索竞品资料"
        );

        let futures: Vec<_> = urls
            .into_iter()
            .map(|url| async move {
                let result = self.search_snippet(&url).await;
                (url, result)
            })
            .collect();
        let results = do_parallel_with_limit(futures, self.config.max_parallels).await;

        let mut entries = vec![];
        let mut warnings = vec![];
        for (url, result) in results {
            let snippet = match result {
                Ok(Some(snippet)) => snippet.split_whitespace().collect::<Vec<_>>().join(" "),
                Ok(None) => {
                    warnings.push(EnrichmentWarning::new(
                        EnrichmentSource::Competitor(url.clone()),
                        "no search results",
                    ));
                    NO_SEARCH_RESULT.to_string()
                }
                Err(message) => {
                    warnings.push(EnrichmentWarning::new(
                        EnrichmentSource::Competitor(url.clone()),
                        message,
                    ));
                    NO_SEARCH_RESULT.to_string()
                }
            };
            entries.push(format!("{}: {}", url, snippet));
        }

        (entries.join(" "), warnings)
    }

    /// 查询并返回第一条非空结果的内容
    async fn search_snippet(&self, query: &str) -> Result<Option<String>, String> {
        match self.searcher.search(query, 1).await {
            Ok(hits) => Ok(hits
                .into_iter()
                .map(|hit| hit.content.trim().to_string())
                .find(|content| !content.is_empty())),
            Err(e) => Err(format!("search for `{}` failed: {}", query, e)),
        }
    }
}
