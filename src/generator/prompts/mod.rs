//! 提示词模板 - 三个固定模板及其静态声明的变量表

use std::collections::BTreeMap;
use std::fmt::Display;

use thiserror::Error;

mod analysis_report;
mod email_draft;
mod product_summary;

pub use analysis_report::AnalysisReportBindings;
pub use email_draft::EmailDraftBindings;
pub use product_summary::ProductSummaryBindings;

/// 变量名 -> 取值；使用有序表保证渲染结果稳定
pub type Bindings = BTreeMap<String, String>;

/// 模板标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    ProductSummary,
    AnalysisReport,
    EmailDraft,
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            TemplateId::ProductSummary => "product-summary",
            TemplateId::AnalysisReport => "analysis-report",
            TemplateId::EmailDraft => "email-draft",
        };
        write!(f, "{}", str)
    }
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::ProductSummary,
        TemplateId::AnalysisReport,
        TemplateId::EmailDraft,
    ];

    /// 模板正文，占位符形如 `{variable}`
    pub fn body(&self) -> &'static str {
        match self {
            TemplateId::ProductSummary => product_summary::TEMPLATE,
            TemplateId::AnalysisReport => analysis_report::TEMPLATE,
            TemplateId::EmailDraft => email_draft::TEMPLATE,
        }
    }

    /// 模板声明的变量集合
    pub fn variables(&self) -> &'static [&'static str] {
        match self {
            TemplateId::ProductSummary => product_summary::VARIABLES,
            TemplateId::AnalysisReport => analysis_report::VARIABLES,
            TemplateId::EmailDraft => email_draft::VARIABLES,
        }
    }
}

/// 变量绑定与模板声明不一致
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateBindingError {
    #[error("template `{template}` is missing a binding for variable `{variable}`")]
    Missing {
        template: TemplateId,
        variable: String,
    },
    #[error("template `{template}` does not declare variable `{variable}`")]
    Unexpected {
        template: TemplateId,
        variable: String,
    },
}

/// 每个模板对应的强类型绑定记录
pub trait TemplateBindings {
    const TEMPLATE: TemplateId;

    fn into_bindings(self) -> Bindings;

    fn render(self) -> Result<String, TemplateBindingError>
    where
        Self: Sized,
    {
        render(Self::TEMPLATE, &self.into_bindings())
    }
}

/// 将绑定代入模板。绑定必须与模板声明的变量集合完全一致，否则报错而不是代入空值。
pub fn render(template: TemplateId, bindings: &Bindings) -> Result<String, TemplateBindingError> {
    let declared = template.variables();

    for variable in declared {
        if !bindings.contains_key(*variable) {
            return Err(TemplateBindingError::Missing {
                template,
                variable: variable.to_string(),
            });
        }
    }
    if let Some(extra) = bindings.keys().find(|key| !declared.contains(&key.as_str())) {
        return Err(TemplateBindingError::Unexpected {
            template,
            variable: extra.clone(),
        });
    }

    Ok(substitute(template.body(), bindings))
}

/// 单遍替换：代入的取值不会被再次扫描
fn substitute(body: &str, bindings: &Bindings) -> String {
    let mut output = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let name = &after_open[..close];
                if let Some(value) = bindings.get(name) {
                    output.push_str(value);
                    rest = &after_open[close + 1..];
                } else {
                    output.push('{');
                    rest = after_open;
                }
            }
            None => {
                output.push('{');
                rest = after_open;
            }
        }
    }
    output.push_str(rest);
    output
}

fn bindings_from<const N: usize>(pairs: [(&str, String); N]) -> Bindings {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
