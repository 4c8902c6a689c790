use super::{Bindings, TemplateBindings, TemplateId, bindings_from};

pub(super) const VARIABLES: &[&str] = &["target_customer", "report", "target_market", "optional"];

pub(super) const TEMPLATE: &str = r#"You are an experienced B2B sales representative. Using the sales-insight report below, write a persuasive outreach email addressed to {target_customer}.

## Sales-insight report
{report}

## Target market
{target_market}

## Additional notes
{optional}

Email requirements:
- Start with a subject line, then the email body.
- Address {target_customer} directly and tailor the message to the target market above.
- Lead with the customer's likely pain points, then show how the product addresses them, drawing only on facts from the report.
- Keep it under 250 words with one clear call to action.
- Sign the email with the CEO's name only if the report's Leadership Information section names the CEO. Otherwise leave the email unsigned and do not use placeholders such as [Your Name]."#;

/// 邮件草稿模板的绑定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailDraftBindings {
    pub target_customer: String,
    /// 上一阶段生成的分析报告
    pub report: String,
    pub target_market: String,
    pub optional: String,
}

impl TemplateBindings for EmailDraftBindings {
    const TEMPLATE: TemplateId = TemplateId::EmailDraft;

    fn into_bindings(self) -> Bindings {
        bindings_from([
            ("target_customer", self.target_customer),
            ("report", self.report),
            ("target_market", self.target_market),
            ("optional", self.optional),
        ])
    }
}
