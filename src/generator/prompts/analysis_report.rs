use super::{Bindings, TemplateBindings, TemplateId, bindings_from};

pub(super) const VARIABLES: &[&str] = &[
    "company_name",
    "company_data",
    "product_name",
    "product_category",
    "product_data",
    "value_proposition",
    "competitors_data",
    "target_market",
    "optional",
];

pub(super) const TEMPLATE: &str = r#"You are a senior sales strategist. Prepare a sales-insight report for the sales team of {company_name} about their product {product_name} ({product_category}).

## Research material

### Company information
{company_data}

### Product summary
{product_data}

### Value proposition
{value_proposition}

### Competitor information
{competitors_data}

### Target market
{target_market}

### Additional notes from the sales team
{optional}

## Report structure
Write the report in Markdown using exactly these sections, in this order:

1. **Company Strategy** - the company's current strategy, priorities and recent initiatives relevant to selling {product_name}.
2. **Competitor Mentions** - competitors relevant to {product_name}, with two subsections:
   - **Competitor Analysis** - what each competitor offers and how it is positioned.
   - **Competitor Comparison** - how {product_name} compares with each competitor. When a value proposition is given above, use it as the axis of comparison and cite it explicitly.
   If the competitor information above is empty, state that no competitor data was supplied instead of guessing competitors.
3. **Leadership Information** - key leaders of {company_name} (CEO first) and their relevance to the sale. Only name people you are confident about.
4. **Product/Strategy Summary** - a concise summary of {product_name} and how it fits the company strategy.
5. **Target Market** - pros and cons of selling {product_name} into the target market above. If no target market is given, infer the most likely one and say so.
6. **References** - the URLs and sources the report relies on.

Be specific, factual and concise. Do not add sections beyond the ones listed."#;

/// 分析报告模板的绑定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReportBindings {
    pub company_name: String,
    pub company_data: String,
    pub product_name: String,
    pub product_category: String,
    /// 上一阶段生成的产品摘要
    pub product_data: String,
    pub value_proposition: String,
    pub competitors_data: String,
    pub target_market: String,
    pub optional: String,
}

impl TemplateBindings for AnalysisReportBindings {
    const TEMPLATE: TemplateId = TemplateId::AnalysisReport;

    fn into_bindings(self) -> Bindings {
        bindings_from([
            ("company_name", self.company_name),
            ("company_data", self.company_data),
            ("product_name", self.product_name),
            ("product_category", self.product_category),
            ("product_data", self.product_data),
            ("value_proposition", self.value_proposition),
            ("competitors_data", self.competitors_data),
            ("target_market", self.target_market),
            ("optional", self.optional),
        ])
    }
}
