use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generator::context::GeneratorContext;
use crate::types::artifact::{ArtifactKind, PipelineResult};

/// 保存已产出的内容，返回写入的文件路径
pub async fn save(
    context: &GeneratorContext,
    product_name: &str,
    result: &PipelineResult,
) -> Result<Vec<PathBuf>> {
    let outlet = DiskOutlet::new(&context.config.output_path);
    outlet.save(product_name, result).await
}

pub trait Outlet {
    async fn save(&self, product_name: &str, result: &PipelineResult) -> Result<Vec<PathBuf>>;
}

/// 以 `{product_name} <kind>.txt` 的形式写入输出目录
pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, product_name: &str, result: &PipelineResult) -> Result<Vec<PathBuf>> {
        // 本次未产出的内容不能留下上一次的同名文件
        for kind in ArtifactKind::ALL {
            if result.get(kind).is_empty() {
                let stale_file_path = self.output_dir.join(kind.file_name(product_name));
                if stale_file_path.exists() {
                    fs::remove_file(&stale_file_path)
                        .context(format!("Failed to remove {:?}", stale_file_path))?;
                    tracing::info!("🗑️ 已移除过期文件: {}", stale_file_path.display());
                }
            }
        }

        let produced = result.produced();
        if produced.is_empty() {
            tracing::info!("没有可保存的产出物");
            return Ok(vec![]);
        }

        tracing::info!("🖊️ 产出物存储中...");
        // 已有目录保留，同名文件覆盖
        fs::create_dir_all(&self.output_dir).context(format!(
            "Failed to create output directory: {:?}",
            self.output_dir
        ))?;

        let mut saved = vec![];
        for (kind, content) in produced {
            let output_file_path = self.output_dir.join(kind.file_name(product_name));
            fs::write(&output_file_path, content)
                .context(format!("Failed to write {:?}", output_file_path))?;
            tracing::info!("💾 已保存: {}", output_file_path.display());
            saved.push(output_file_path);
        }

        tracing::info!("💾 保存完成，输出目录: {}", self.output_dir.display());
        Ok(saved)
    }
}
