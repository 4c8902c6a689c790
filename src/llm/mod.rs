//! 文本生成能力 - 一次渲染好的提示词进，纯文本出

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::LLMConfig;

pub mod catalog;
pub mod client;

/// 一次请求使用的生成参数，创建后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    model: String,
    temperature: f64,
}

/// 生成参数不合法
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("model id must not be empty")]
    EmptyModel,
    #[error("temperature {0} is outside [0.0, 1.0]")]
    Temperature(f64),
}

impl GenerationSettings {
    pub fn new(model: impl Into<String>, temperature: f64) -> Result<Self, SettingsError> {
        let model = model.into().trim().to_string();
        if model.is_empty() {
            return Err(SettingsError::EmptyModel);
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(SettingsError::Temperature(temperature));
        }
        Ok(Self { model, temperature })
    }

    /// 以配置中的默认模型与温度构建
    pub fn from_config(config: &LLMConfig) -> Result<Self, SettingsError> {
        Self::new(config.model.clone(), config.temperature)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

/// 文本生成能力。传输或鉴权失败直接返回错误，不做重试。
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String>;
}
