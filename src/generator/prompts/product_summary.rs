use super::{Bindings, TemplateBindings, TemplateId, bindings_from};

pub(super) const VARIABLES: &[&str] = &[
    "company_data",
    "product_name",
    "product_category",
    "product_info",
    "value_proposition",
];

pub(super) const TEMPLATE: &str = r#"You are a product research analyst supporting a B2B sales team.

Using the company information below as context, write a detailed summary of the product "{product_name}" (category: {product_category}).
Cover what the product does, its key features and capabilities, who it is built for, how it is priced or packaged if known, and how it is positioned against alternatives.

## Company information
{company_data}

## Product information supplied by the sales team
{product_info}

## Value proposition
{value_proposition}

Only use facts supported by the material above or by well-known public information about the company.
If no information about the product can be found, do not invent details; answer with exactly this one line instead:
{product_name} is a {product_category} product. {value_proposition}"#;

/// 产品摘要模板的绑定
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSummaryBindings {
    pub company_data: String,
    pub product_name: String,
    pub product_category: String,
    pub product_info: String,
    pub value_proposition: String,
}

impl TemplateBindings for ProductSummaryBindings {
    const TEMPLATE: TemplateId = TemplateId::ProductSummary;

    fn into_bindings(self) -> Bindings {
        bindings_from([
            ("company_data", self.company_data),
            ("product_name", self.product_name),
            ("product_category", self.product_category),
            ("product_info", self.product_info),
            ("value_proposition", self.value_proposition),
        ])
    }
}
