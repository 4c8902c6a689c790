//! 网络搜索能力

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;

/// 单条搜索结果，资料收集只使用content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// 网络搜索能力：按查询返回有序结果
#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// 基于Tavily搜索API的实现
#[derive(Clone)]
pub struct TavilySearcher {
    client: reqwest::Client,
    config: SearchConfig,
}

impl TavilySearcher {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl WebSearcher for TavilySearcher {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        if self.config.api_key.trim().is_empty() {
            return Err(anyhow!("search API key is not configured (TAVILY_API_KEY)"));
        }

        // 配置中的max_results是单次查询的上限
        let max_results = max_results.min(self.config.max_results.max(1));
        let url = format!("{}/search", self.config.api_base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "query": query,
            "max_results": max_results,
            "search_depth": self.config.search_depth,
            "include_answer": false,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.api_key.trim())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("search API returned {}: {}", status, detail));
        }

        let parsed: TavilyResponse = response.json().await?;
        tracing::debug!(query, hits = parsed.results.len(), "搜索完成");
        Ok(parsed.results.into_iter().take(max_results).collect())
    }
}
