use crate::models::quiz::Quiz;
use serde::{Deserialize, Serialize};

/// 一次文档分析的完整产出
///
/// 三个字段全部必需：任何一个生成步骤失败，整次分析都视为失败，
/// 不保留部分结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 文档摘要（markdown 格式）
    pub summary: String,
    /// 7 天行动计划
    pub strategy: String,
    /// 配套测验
    pub quiz: Quiz,
}
