//! PDF 文本提取服务 - 业务能力层
//!
//! 只负责"把 PDF 字节变成文本"能力，不关心流程
//!
//! ## 提取约定
//! - 按物理页序（1-indexed）逐页提取
//! - 单页解码失败按空白页处理，不让整个文档失败
//! - 纯图片 PDF 返回空文本而不是错误，由上层判定"无可提取文本"
//! - 非 PDF / 损坏文件返回 `ExtractError::InvalidDocument`

use crate::models::DocumentText;
use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

/// PDF 提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 文件不是合法的 PDF 或已损坏
    #[error("failed to load PDF document: {0}")]
    InvalidDocument(String),

    /// 文档被加密，无法提取
    #[error("PDF document is encrypted")]
    Encrypted,

    /// 文档没有任何可提取的文本（由上层在空文本时构造）
    #[error("document contains no extractable text")]
    NoExtractableText,
}

/// PDF 文本提取服务
///
/// 职责：
/// - 从 PDF 字节中提取逐页文本
/// - 只处理单个文档
/// - 不关心流程顺序
pub struct PdfExtractor;

impl PdfExtractor {
    /// 创建新的提取服务
    pub fn new() -> Self {
        Self
    }

    /// 从 PDF 字节中提取文本
    ///
    /// # 参数
    /// - `bytes`: PDF 文件的原始字节
    ///
    /// # 返回
    /// 返回按页序排列的 `DocumentText`；纯图片文档返回空页文本而非错误
    pub fn extract(&self, bytes: &[u8]) -> Result<DocumentText, ExtractError> {
        debug!("开始解析 PDF，大小: {} 字节", bytes.len());

        let doc =
            Document::load_mem(bytes).map_err(|e| ExtractError::InvalidDocument(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(ExtractError::Encrypted);
        }

        // get_pages 返回 BTreeMap<页号, ObjectId>，遍历顺序即物理页序
        let page_map = doc.get_pages();
        let mut pages = Vec::with_capacity(page_map.len());

        for (page_num, _object_id) in page_map {
            let text = match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    // 单页失败按空白页处理，保证纯图片页不拖垮整个文档
                    warn!("第 {} 页文本提取失败，按空白页处理: {}", page_num, e);
                    String::new()
                }
            };
            debug!("第 {} 页: {} 字符", page_num, text.chars().count());
            pages.push(text);
        }

        debug!("PDF 解析完成，共 {} 页", pages.len());

        Ok(DocumentText::new(pages))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// 用 lopdf 构造一个简单的 PDF，每个元素对应一页的文本
    ///
    /// 空字符串会生成一个没有文字绘制指令的页面（模拟纯图片页）
    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf to memory");
        bytes
    }

    #[test]
    fn test_extract_single_page() {
        let bytes = build_pdf(&["Hello World"]);
        let extractor = PdfExtractor::new();

        let document = extractor.extract(&bytes).expect("extract");
        assert_eq!(document.page_count(), 1);
        assert!(document.full_text().contains("Hello World"));
        assert!(!document.is_substantially_empty());
    }

    #[test]
    fn test_extract_preserves_page_order() {
        let bytes = build_pdf(&["Alpha page", "Beta page", "Gamma page"]);
        let extractor = PdfExtractor::new();

        let document = extractor.extract(&bytes).expect("extract");
        assert_eq!(document.page_count(), 3);
        assert!(document.pages()[0].contains("Alpha"));
        assert!(document.pages()[1].contains("Beta"));
        assert!(document.pages()[2].contains("Gamma"));
    }

    #[test]
    fn test_textless_pdf_yields_empty_not_error() {
        let bytes = build_pdf(&["", ""]);
        let extractor = PdfExtractor::new();

        let document = extractor.extract(&bytes).expect("extract");
        assert_eq!(document.page_count(), 2);
        assert!(document.is_substantially_empty());
    }

    #[test]
    fn test_non_pdf_bytes_fail_distinctly() {
        let extractor = PdfExtractor::new();

        let err = extractor.extract(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDocument(_)));
    }

    #[test]
    fn test_truncated_pdf_fails_distinctly() {
        let mut bytes = build_pdf(&["Hello World"]);
        bytes.truncate(40);
        let extractor = PdfExtractor::new();

        let err = extractor.extract(&bytes).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidDocument(_)));
    }
}
