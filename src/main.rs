use anyhow::{Context, Result};
use clap::Parser;

use sales_insight_rs::cli::{self, Args};
use sales_insight_rs::generator::pipeline::PipelineError;
use sales_insight_rs::generator::workflow::launch;
use sales_insight_rs::llm::GenerationSettings;
use sales_insight_rs::llm::catalog::fetch_models;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let list_models = args.list_models;
    let form = args.subject_form()?;
    let config = args.into_config()?;

    cli::init_tracing(config.verbose);

    if list_models {
        for model in fetch_models(&config.llm).await? {
            println!("{}", model);
        }
        return Ok(());
    }

    // 先校验必填字段，再读取文档、创建模型客户端
    let missing = form.missing_required_fields();
    if !missing.is_empty() {
        let err = PipelineError::missing_fields(&missing);
        tracing::error!("❌ {}", err);
        return Err(err.into());
    }

    let settings =
        GenerationSettings::from_config(&config.llm).context("Invalid generation settings")?;
    let subject = form.into_subject()?;

    let run = launch(&config, &subject, &settings).await?;
    match run.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
