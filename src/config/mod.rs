use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    /// OpenAI兼容接口（默认指向Groq）
    #[serde(rename = "openai")]
    #[default]
    OpenAI,
    #[serde(rename = "openrouter")]
    OpenRouter,
    #[serde(rename = "anthropic")]
    Anthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "ollama")]
    Ollama,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::OpenRouter => write!(f, "openrouter"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "groq" => Ok(LLMProvider::OpenAI),
            "openrouter" => Ok(LLMProvider::OpenRouter),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 生成物输出目录
    pub output_path: PathBuf,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 网络搜索配置
    pub search: SearchConfig,

    /// 资料收集配置
    pub enrichment: EnrichmentConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 默认模型
    pub model: String,

    /// 温度，取值范围 [0.0, 1.0]
    pub temperature: f64,

    /// 最大tokens
    pub max_tokens: u32,

    /// 单次生成的超时时间（秒）
    pub timeout_seconds: u64,

    /// 模型目录过滤用的上下文窗口大小
    pub catalog_context_window: u64,
}

/// 网络搜索配置（Tavily）
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索服务 API KEY
    pub api_key: String,

    /// 搜索服务基地址
    pub api_base_url: String,

    /// 单次查询返回结果数的上限
    pub max_results: usize,

    /// 搜索深度（basic / advanced）
    pub search_depth: String,

    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 资料收集配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// 公司官网检索时拼接的结果条数
    pub company_top_k: usize,

    /// 竞品检索的最大并发数
    pub max_parallels: usize,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./sales-insight.out"),
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            enrichment: EnrichmentConfig::default(),
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.groq.com/openai/v1"),
            model: String::from("llama3-8b-8192"),
            temperature: 0.5,
            max_tokens: 4096,
            timeout_seconds: 120,
            catalog_context_window: 8192,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TAVILY_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.tavily.com"),
            max_results: 5,
            search_depth: String::from("basic"),
            timeout_seconds: 30,
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            company_top_k: 2,
            max_parallels: 3,
        }
    }
}
