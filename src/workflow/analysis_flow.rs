//! 文档分析流程 - 流程层
//!
//! 核心职责：定义"一份文档"的完整分析流程
//!
//! 流程顺序：
//! 1. 提取 PDF 文本 → 空文本守卫（空文本直接失败，不发起任何生成调用）
//! 2. 三路并发生成（摘要 / 7 天计划 / 测验）
//! 3. 全有或全无聚合（任何一路失败整体失败，不产出部分结果）

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppError, GenerationError};
use crate::models::{AnalysisResult, Quiz};
use crate::services::pdf_extractor::ExtractError;
use crate::services::{GenerationService, PdfExtractor};
use crate::utils::logging::truncate_text;
use crate::workflow::analysis_ctx::AnalysisCtx;

/// 文档分析流程
///
/// 职责：
/// - 编排完整的单文档分析流程
/// - 决定何时提取、何时生成、如何聚合
/// - 不持有会话状态
/// - 只依赖业务能力（services）
pub struct AnalysisFlow {
    extractor: PdfExtractor,
    generator: GenerationService,
    verbose_logging: bool,
}

impl AnalysisFlow {
    /// 创建新的分析流程
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: PdfExtractor::new(),
            generator: GenerationService::new(config),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 对一份文档执行完整分析
    ///
    /// # 参数
    /// - `bytes`: PDF 文件的原始字节
    /// - `ctx`: 本次提交的上下文（日志前缀）
    ///
    /// # 返回
    /// 三个生成任务全部成功时返回聚合后的 `AnalysisResult`
    pub async fn run(&self, bytes: &[u8], ctx: &AnalysisCtx) -> Result<AnalysisResult> {
        // ========== 流程 1: 提取 PDF 文本 ==========
        info!("{} 🔍 正在提取 PDF 文本...", ctx);

        let document = self.extractor.extract(bytes).map_err(AppError::Extract)?;

        // 空文本守卫：不发起任何生成调用
        if document.is_substantially_empty() {
            warn!(
                "[分析 #{}] ⚠️ 文档没有可提取的文本（共 {} 页）",
                ctx.generation,
                document.page_count()
            );
            return Err(AppError::Extract(ExtractError::NoExtractableText).into());
        }

        info!(
            "[分析 #{}] ✓ 提取完成: {} 页, {} 字符",
            ctx.generation,
            document.page_count(),
            document.char_count()
        );

        if self.verbose_logging {
            debug!(
                "[分析 #{}] 文本预览: {}",
                ctx.generation,
                truncate_text(&document.full_text(), 80)
            );
        }

        // ========== 流程 2: 三路并发生成 ==========
        info!(
            "[分析 #{}] 🚀 并发执行三个生成任务（摘要 / 7 天计划 / 测验）...",
            ctx.generation
        );

        let text = document.full_text();
        let (summary_res, strategy_res, quiz_res) = futures::future::join3(
            self.generator.generate_summary(&text),
            self.generator.generate_weekly_strategy(&text),
            self.generator.generate_quiz(&text),
        )
        .await;

        // ========== 流程 3: 全有或全无聚合 ==========
        aggregate_outcomes(ctx, summary_res, strategy_res, quiz_res)
    }
}

/// 聚合三个生成结果
///
/// 三路全部落定后统一裁决：任何一路失败都让整次分析失败，
/// 但裁决前把每一路的失败原因都记入日志。单路失败时保留具体原因，
/// 多路失败时归并为统一的错误信息。
fn aggregate_outcomes(
    ctx: &AnalysisCtx,
    summary: Result<String>,
    strategy: Result<String>,
    quiz: Result<Quiz>,
) -> Result<AnalysisResult> {
    let mut errors: Vec<anyhow::Error> = Vec::new();

    let summary = match summary {
        Ok(s) => Some(s),
        Err(e) => {
            error!("[分析 #{}] ❌ 摘要生成失败: {}", ctx.generation, e);
            errors.push(e);
            None
        }
    };
    let strategy = match strategy {
        Ok(s) => Some(s),
        Err(e) => {
            error!("[分析 #{}] ❌ 7 天计划生成失败: {}", ctx.generation, e);
            errors.push(e);
            None
        }
    };
    let quiz = match quiz {
        Ok(q) => Some(q),
        Err(e) => {
            error!("[分析 #{}] ❌ 测验生成失败: {}", ctx.generation, e);
            errors.push(e);
            None
        }
    };

    match (summary, strategy, quiz) {
        (Some(summary), Some(strategy), Some(quiz)) => {
            info!("[分析 #{}] ✓ 三个生成任务全部成功", ctx.generation);
            Ok(AnalysisResult {
                summary,
                strategy,
                quiz,
            })
        }
        _ => {
            if errors.len() == 1 {
                Err(errors.remove(0))
            } else {
                Err(AppError::Generation(GenerationError::Incomplete).into())
            }
        }
    }
}
