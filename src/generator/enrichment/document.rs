//! 文档文本提取能力

use anyhow::{Context, Result};

/// 文档文本提取：按页序返回每一页的文本
pub trait DocumentExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// 基于lopdf的PDF文本提取
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl DocumentExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let document = lopdf::Document::load_mem(bytes).context("Failed to parse PDF document")?;
        let pages = document.get_pages().into_keys().map(|page_number| {
            let text = document
                .extract_text(&[page_number])
                .map_err(anyhow::Error::from);
            (page_number, text)
        });
        Ok(collect_pages(pages))
    }
}

/// 单页提取失败时记为空页，其余页面照常保留
fn collect_pages<I>(pages: I) -> Vec<String>
where
    I: IntoIterator<Item = (u32, Result<String>)>,
{
    pages
        .into_iter()
        .map(|(page_number, text)| match text {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!("⚠️ 第 {} 页文本提取失败: {}", page_number, e);
                String::new()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// 构建每页一行文本的PDF
    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = vec![];
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                document.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_texts.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        document.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_pages_are_extracted_in_order() {
        let bytes = build_pdf(&["Alpha page", "Beta page"]);

        let pages = PdfTextExtractor.extract_pages(&bytes).unwrap();
        assert_eq!(pages, vec!["Alpha page", "Beta page"]);
    }

    #[test]
    fn test_failed_page_does_not_drop_other_pages() {
        let pages = collect_pages(vec![
            (1, Ok(" Alpha page\n".to_string())),
            (2, Err(anyhow!("unsupported font encoding"))),
            (3, Ok("Gamma page".to_string())),
        ]);
        assert_eq!(pages, vec!["Alpha page", "", "Gamma page"]);
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let extractor = PdfTextExtractor;
        assert!(extractor.extract_pages(b"definitely not a pdf").is_err());
        assert!(extractor.extract_pages(&[]).is_err());
    }
}
