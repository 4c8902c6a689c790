//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::LLMConfig;
use crate::llm::{GenerationSettings, TextGenerator};

mod providers;

use providers::ProviderClient;

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextGenerator for LLMClient {
    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String> {
        let agent = self.client.create_agent(
            settings.model(),
            settings.temperature(),
            self.config.max_tokens,
        );
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        tracing::debug!(
            provider = %self.config.provider,
            model = settings.model(),
            temperature = settings.temperature(),
            prompt_chars = prompt.len(),
            "调用模型服务"
        );

        match tokio::time::timeout(timeout, agent.prompt(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(anyhow!(
                "model `{}` did not respond within {}s",
                settings.model(),
                self.config.timeout_seconds
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LLMProvider;

    #[test]
    fn test_client_creation_for_providers() {
        for provider in [
            LLMProvider::OpenAI,
            LLMProvider::OpenRouter,
            LLMProvider::DeepSeek,
            LLMProvider::Ollama,
        ] {
            let config = LLMConfig {
                provider,
                api_key: "test-key".to_string(),
                ..Default::default()
            };
            assert!(LLMClient::new(config).is_ok());
        }
    }

    #[tokio::test]
    async fn test_generate_against_unreachable_endpoint_fails() {
        let config = LLMConfig {
            api_key: "test-key".to_string(),
            api_base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_seconds: 5,
            ..Default::default()
        };
        let client = LLMClient::new(config).unwrap();
        let settings = GenerationSettings::new("llama3-8b-8192", 0.5).unwrap();

        assert!(client.generate("Hello", &settings).await.is_err());
    }
}
