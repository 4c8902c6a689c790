use crate::config::{Config, LLMProvider};
use crate::types::subject::SubjectForm;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// 默认配置文件名，位于当前目录
pub const DEFAULT_CONFIG_FILE: &str = "sales-insight.toml";

/// Sales-Insight-RS - 由Rust与AI驱动的销售洞察报告与外联邮件生成工具
#[derive(Parser, Debug)]
#[command(name = "sales-insight-rs")]
#[command(
    about = "AI sales assistant: collects company, product and competitor context, then chains three prompts into a product summary, a sales-insight report and an outreach email."
)]
#[command(version)]
pub struct Args {
    /// 公司名称（必填）
    #[arg(long)]
    pub company_name: Option<String>,

    /// 公司官网
    #[arg(long)]
    pub company_website: Option<String>,

    /// 产品名称（必填）
    #[arg(long)]
    pub product_name: Option<String>,

    /// 产品类别
    #[arg(long)]
    pub product_category: Option<String>,

    /// 产品描述
    #[arg(long)]
    pub product_description: Option<String>,

    /// 产品页面URL
    #[arg(long)]
    pub product_url: Option<String>,

    /// 产品资料PDF
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// 价值主张
    #[arg(long)]
    pub value_proposition: Option<String>,

    /// 竞品，可包含多个URL，以逗号或空白分隔
    #[arg(long)]
    pub competitors: Option<String>,

    /// 目标市场
    #[arg(long)]
    pub target_market: Option<String>,

    /// 目标客户
    #[arg(long)]
    pub target_customer: Option<String>,

    /// 补充说明
    #[arg(long)]
    pub optional_notes: Option<String>,

    /// 从TOML文件读取表单，命令行参数优先
    #[arg(short, long)]
    pub subject: Option<PathBuf>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 模型ID
    #[arg(short, long)]
    pub model: Option<String>,

    /// 温度参数 [0.0, 1.0]
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// LLM Provider (openai, groq, openrouter, anthropic, deepseek, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// 列出可用模型后退出
    #[arg(long)]
    pub list_models: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 组装表单：先读取 `--subject` 文件，再用命令行参数覆盖
    pub fn subject_form(&self) -> Result<SubjectForm> {
        let base = match &self.subject {
            Some(path) => SubjectForm::from_file(path)?,
            None => SubjectForm::default(),
        };

        let overrides = SubjectForm {
            company_name: self.company_name.clone(),
            company_website: self.company_website.clone(),
            product_name: self.product_name.clone(),
            product_category: self.product_category.clone(),
            product_description: self.product_description.clone(),
            product_url: self.product_url.clone(),
            document: self.document.clone(),
            value_proposition: self.value_proposition.clone(),
            competitors: self.competitors.clone(),
            target_market: self.target_market.clone(),
            target_customer: self.target_customer.clone(),
            optional_notes: self.optional_notes.clone(),
        };

        Ok(base.merge(overrides))
    }

    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            // 显式指定的配置文件必须可读
            Some(config_path) => Config::from_file(config_path)?,
            None => {
                let default_config_path = std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(DEFAULT_CONFIG_FILE);

                if default_config_path.exists() {
                    Config::from_file(&default_config_path)?
                } else {
                    Config::default()
                }
            }
        };

        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            config.llm.provider = provider_str
                .parse::<LLMProvider>()
                .map_err(anyhow::Error::msg)
                .context("Invalid --llm-provider")?;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

/// 初始化日志，`RUST_LOG` 优先
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        "sales_insight_rs=debug"
    } else {
        "sales_insight_rs=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
