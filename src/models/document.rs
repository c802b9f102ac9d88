use serde::{Deserialize, Serialize};

/// 提取出的文档文本
///
/// 按物理页序（从第 1 页开始）保存每页的文本，一次分析周期内不可变。
/// 纯图片 PDF 的每一页都是空字符串，整体视为"无可提取文本"。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    pages: Vec<String>,
}

impl DocumentText {
    /// 从按页序排列的文本创建
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// 页数
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 各页文本（页序与物理页序一致）
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// 拼接后的全文，页与页之间以换行分隔
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }

    /// 全文字符数（按 Unicode 字符计）
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.chars().count()).sum()
    }

    /// 是否没有任何实质文本（所有页均为空或纯空白）
    pub fn is_substantially_empty(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}
