use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 用户上传的文档（目前只支持PDF）
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 一次报告请求的全部输入，提交后不可变
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subject {
    pub company_name: String,
    pub company_website: Option<String>,
    pub product_name: String,
    pub product_category: Option<String>,
    pub product_description: Option<String>,
    pub product_url: Option<String>,
    pub uploaded_document: Option<UploadedDocument>,
    pub value_proposition: Option<String>,
    /// 竞品，自由文本，可能包含多个URL
    pub competitors: Option<String>,
    pub target_market: Option<String>,
    pub target_customer: Option<String>,
    pub optional_notes: Option<String>,
}

impl Subject {
    pub const COMPANY_NAME: &'static str = "company_name";
    pub const PRODUCT_NAME: &'static str = "product_name";

    /// 返回缺失的必填字段名
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        missing_required(&self.company_name, &self.product_name)
    }
}

fn missing_required(company_name: &str, product_name: &str) -> Vec<&'static str> {
    let mut missing = vec![];
    if company_name.trim().is_empty() {
        missing.push(Subject::COMPANY_NAME);
    }
    if product_name.trim().is_empty() {
        missing.push(Subject::PRODUCT_NAME);
    }
    missing
}

/// 可选字段的文本值，缺省时为空串
pub fn optional_text(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// 表单原始输入，可以从TOML文件读取，也可以由命令行参数拼装
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SubjectForm {
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub product_description: Option<String>,
    pub product_url: Option<String>,
    /// 待提取文本的PDF文件路径
    pub document: Option<PathBuf>,
    pub value_proposition: Option<String>,
    pub competitors: Option<String>,
    pub target_market: Option<String>,
    pub target_customer: Option<String>,
    pub optional_notes: Option<String>,
}

impl SubjectForm {
    /// 从TOML文件加载表单
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read subject file: {:?}", path))?;
        toml::from_str(&content).context("Failed to parse subject file")
    }

    /// 用另一份表单中已填写的字段覆盖当前表单
    pub fn merge(mut self, overrides: SubjectForm) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(
                    if overrides.$field.is_some() {
                        self.$field = overrides.$field;
                    }
                )*
            };
        }
        take!(
            company_name,
            company_website,
            product_name,
            product_category,
            product_description,
            product_url,
            document,
            value_proposition,
            competitors,
            target_market,
            target_customer,
            optional_notes
        );
        self
    }

    /// 缺失的必填字段名，不读取任何文件
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        missing_required(
            self.company_name.as_deref().unwrap_or_default(),
            self.product_name.as_deref().unwrap_or_default(),
        )
    }

    /// 读取上传文档并生成不可变的Subject
    pub fn into_subject(self) -> Result<Subject> {
        let uploaded_document = match self.document {
            Some(path) => {
                let bytes = std::fs::read(&path)
                    .context(format!("Failed to read uploaded document: {:?}", path))?;
                let file_name = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                Some(UploadedDocument { file_name, bytes })
            }
            None => None,
        };

        Ok(Subject {
            company_name: self.company_name.unwrap_or_default().trim().to_string(),
            company_website: non_blank(self.company_website),
            product_name: self.product_name.unwrap_or_default().trim().to_string(),
            product_category: non_blank(self.product_category),
            product_description: non_blank(self.product_description),
            product_url: non_blank(self.product_url),
            uploaded_document,
            value_proposition: non_blank(self.value_proposition),
            competitors: non_blank(self.competitors),
            target_market: non_blank(self.target_market),
            target_customer: non_blank(self.target_customer),
            optional_notes: non_blank(self.optional_notes),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
