//! 模型目录 - 从生成服务的 `/models` 接口获取可用模型列表

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::config::LLMConfig;

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

/// 目录中的单个模型
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ModelEntry {
    pub id: String,
    #[serde(default)]
    pub context_window: Option<u64>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// 只保留上下文窗口匹配且处于active状态的模型
pub fn filter_models(entries: &[ModelEntry], context_window: u64) -> Vec<String> {
    entries
        .iter()
        .filter(|m| m.context_window == Some(context_window) && m.active == Some(true))
        .map(|m| m.id.clone())
        .collect()
}

/// 拉取模型目录并按配置过滤
pub async fn fetch_models(config: &LLMConfig) -> Result<Vec<String>> {
    let url = format!("{}/models", config.api_base_url.trim_end_matches('/'));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()?;

    let response = client
        .get(&url)
        .bearer_auth(&config.api_key)
        .header("Content-Type", "application/json")
        .send()
        .await
        .context(format!("Failed to request model catalog: {}", url))?
        .error_for_status()
        .context("Model catalog request was rejected")?;

    let list: ModelList = response
        .json()
        .await
        .context("Failed to parse model catalog")?;

    let models = filter_models(&list.data, config.catalog_context_window);
    tracing::debug!(
        total = list.data.len(),
        selected = models.len(),
        "模型目录获取完成"
    );
    Ok(models)
}
