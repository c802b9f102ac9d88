//! 分析上下文
//!
//! 封装"我正在处理第几次提交的哪个文件"这一信息

use std::fmt::Display;

/// 分析上下文
///
/// 包含处理单次提交所需的全部标识信息
#[derive(Debug, Clone)]
pub struct AnalysisCtx {
    /// 文件名（仅用于日志显示）
    pub file_name: String,

    /// 提交代号（每次提交递增，用于日志前缀和过期结果判定）
    pub generation: u64,
}

impl AnalysisCtx {
    /// 创建新的分析上下文
    pub fn new(file_name: String, generation: u64) -> Self {
        Self {
            file_name,
            generation,
        }
    }
}

impl Display for AnalysisCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[分析 #{} 文件 {}]", self.generation, self.file_name)
    }
}
