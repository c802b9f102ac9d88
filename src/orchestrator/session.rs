//! 分析会话状态机 - 编排层
//!
//! ## 职责
//! - 维护一次分析会话的状态流转: initial → loading → results / error
//! - 用代次计数器丢弃过期的分析结果（新提交取代旧提交）
//! - 失败时同时产出内联错误信息和弹出式通知

use anyhow::Result;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::AnalysisResult;
use crate::services::ExtractError;
use crate::workflow::{AnalysisCtx, AnalysisFlow};

/// 会话状态
///
/// 结果和错误信息作为状态的载荷存放，
/// 不存在"results 状态却没有结果"这类非法组合。
#[derive(Debug, Clone)]
pub enum SessionState {
    /// 等待上传
    Initial,
    /// 提取与生成进行中
    Loading,
    /// 三个生成任务全部成功
    Results(AnalysisResult),
    /// 提取或任一生成任务失败
    Error {
        /// 展示给用户的内联错误信息
        message: String,
    },
}

impl SessionState {
    /// 状态名（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Initial => "initial",
            SessionState::Loading => "loading",
            SessionState::Results(_) => "results",
            SessionState::Error { .. } => "error",
        }
    }

    /// 是否为一次提交的终态
    pub fn is_settled(&self) -> bool {
        matches!(self, SessionState::Results(_) | SessionState::Error { .. })
    }
}

/// 一次提交的凭据
///
/// `begin_submit` 发放，`complete_submit` 核对。
/// 凭据代次落后于会话代次时，结果作废。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

impl SubmitTicket {
    /// 本次提交的代次编号
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 弹出式通知
///
/// 与 `SessionState::Error` 的内联信息互补：
/// 内联信息说明具体原因，通知只提示"出了问题"。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub detail: String,
}

/// 分析会话
///
/// 串起"上传 → 分析 → 展示/重来"的完整生命周期。
/// 每次提交会让代次计数器加一，迟到的旧代次结果直接丢弃，
/// 保证最终展示的永远是最后一次提交的产物。
pub struct AnalysisSession {
    state: SessionState,
    generation: u64,
    notifications: Vec<Notification>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Initial,
            generation: 0,
            notifications: Vec::new(),
        }
    }

    /// 当前状态
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// 开始一次提交
    ///
    /// 任何状态下都可以发起：新提交取代进行中或已完成的旧提交。
    /// 会话进入 loading，返回本次提交的凭据。
    pub fn begin_submit(&mut self) -> SubmitTicket {
        if matches!(self.state, SessionState::Loading) {
            warn!("⚠️ 上一次提交尚未完成，本次提交将取代它");
        }

        self.generation += 1;
        self.state = SessionState::Loading;
        info!("会话进入 loading 状态 (提交 #{})", self.generation);

        SubmitTicket {
            generation: self.generation,
        }
    }

    /// 提交分析结果
    ///
    /// 凭据过期（期间有新提交或重置）时不改动任何状态，返回 false。
    ///
    /// # 参数
    /// - `ticket`: `begin_submit` 发放的凭据
    /// - `outcome`: 流程层的分析结果
    ///
    /// # 返回
    /// 结果是否被采纳
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<AnalysisResult>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                "⚠️ 丢弃过期的分析结果 (提交 #{}, 当前 #{})",
                ticket.generation, self.generation
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                info!("✅ 提交 #{} 完成，会话进入 results 状态", ticket.generation);
                self.state = SessionState::Results(result);
            }
            Err(e) => {
                let message = error_message(&e);
                warn!("❌ 提交 #{} 失败: {}", ticket.generation, message);
                self.state = SessionState::Error { message };
                self.notifications.push(Notification {
                    title: "Analysis Failed".to_string(),
                    detail: "There was a problem generating insights from your document."
                        .to_string(),
                });
            }
        }

        true
    }

    /// 提交一份 PDF 并等待分析完成
    ///
    /// `begin_submit` / `complete_submit` 的组合封装，
    /// 适用于不需要在分析期间做其他事情的调用方。
    pub async fn submit(
        &mut self,
        flow: &AnalysisFlow,
        file_name: &str,
        bytes: &[u8],
    ) -> &SessionState {
        let ticket = self.begin_submit();
        let ctx = AnalysisCtx::new(file_name.to_string(), ticket.generation());

        let outcome = flow.run(bytes, &ctx).await;
        self.complete_submit(ticket, outcome);

        self.state()
    }

    /// 重置会话，回到 initial 状态
    ///
    /// 同时让代次加一，在途的旧提交全部作废。
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::Initial;
        self.notifications.clear();
        info!("🔄 会话已重置，等待新的上传");
    }

    /// 取走积压的通知
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

/// 把失败原因翻译成展示给用户的内联错误信息
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AppError>() {
        Some(AppError::Extract(ExtractError::NoExtractableText)) => {
            "Could not extract text from the PDF: document contains no extractable text. \
             It might be empty or image-based."
                .to_string()
        }
        Some(AppError::Extract(e)) => {
            format!("Failed to process PDF. Please ensure it is a valid file. ({})", e)
        }
        _ => format!(
            "An error occurred while analyzing the document: {}. Please try again.",
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::sample_quiz;

    fn ok_outcome() -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            summary: "the summary".to_string(),
            strategy: "the strategy".to_string(),
            quiz: sample_quiz(),
        })
    }

    #[test]
    fn test_new_session_starts_initial() {
        let session = AnalysisSession::new();
        assert!(matches!(session.state(), SessionState::Initial));
        assert_eq!(session.state().name(), "initial");
        assert!(!session.state().is_settled());
    }

    #[test]
    fn test_begin_submit_enters_loading() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin_submit();

        assert!(matches!(session.state(), SessionState::Loading));
        assert_eq!(ticket.generation(), 1);
    }

    #[test]
    fn test_successful_submit_reaches_results() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin_submit();

        assert!(session.complete_submit(ticket, ok_outcome()));

        match session.state() {
            SessionState::Results(result) => {
                assert_eq!(result.summary, "the summary");
                assert_eq!(result.strategy, "the strategy");
            }
            other => panic!("期望 results 状态，实际 {}", other.name()),
        }
        // 成功路径不产生通知
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_failed_submit_reaches_error_with_notification() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin_submit();

        let accepted = session.complete_submit(
            ticket,
            Err(AppError::generation_empty("summary").into()),
        );
        assert!(accepted);

        match session.state() {
            SessionState::Error { message } => {
                assert!(message.contains("An error occurred while analyzing the document"));
                assert!(message.contains("Please try again."));
            }
            other => panic!("期望 error 状态，实际 {}", other.name()),
        }

        let notifications = session.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Analysis Failed");
        // 通知只取走一次
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_empty_document_gets_specific_message() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin_submit();

        session.complete_submit(
            ticket,
            Err(AppError::Extract(ExtractError::NoExtractableText).into()),
        );

        match session.state() {
            SessionState::Error { message } => {
                assert!(message.contains("no extractable text"));
                assert!(message.contains("empty or image-based"));
            }
            other => panic!("期望 error 状态，实际 {}", other.name()),
        }
    }

    #[test]
    fn test_invalid_document_gets_specific_message() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin_submit();

        session.complete_submit(
            ticket,
            Err(AppError::Extract(ExtractError::InvalidDocument(
                "unexpected end of file".to_string(),
            ))
            .into()),
        );

        match session.state() {
            SessionState::Error { message } => {
                assert!(message.contains("Please ensure it is a valid file"));
            }
            other => panic!("期望 error 状态，实际 {}", other.name()),
        }
    }

    #[test]
    fn test_reset_returns_to_initial_from_any_state() {
        let mut session = AnalysisSession::new();

        let ticket = session.begin_submit();
        session.complete_submit(ticket, ok_outcome());
        session.reset();
        assert!(matches!(session.state(), SessionState::Initial));

        let ticket = session.begin_submit();
        session.complete_submit(ticket, Err(AppError::generation_empty("quiz").into()));
        session.reset();
        assert!(matches!(session.state(), SessionState::Initial));
        // 重置顺带清空积压的通知
        assert!(session.take_notifications().is_empty());

        // 重置后的会话可以照常开始新一轮提交
        let ticket = session.begin_submit();
        assert!(matches!(session.state(), SessionState::Loading));
        assert!(session.complete_submit(ticket, ok_outcome()));
        assert!(matches!(session.state(), SessionState::Results(_)));
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut session = AnalysisSession::new();

        let first = session.begin_submit();
        let second = session.begin_submit();

        // 旧提交的结果迟到，不得覆盖状态
        assert!(!session.complete_submit(first, ok_outcome()));
        assert!(matches!(session.state(), SessionState::Loading));

        let accepted = session.complete_submit(
            second,
            Ok(AnalysisResult {
                summary: "second summary".to_string(),
                strategy: "second strategy".to_string(),
                quiz: sample_quiz(),
            }),
        );
        assert!(accepted);

        match session.state() {
            SessionState::Results(result) => assert_eq!(result.summary, "second summary"),
            other => panic!("期望 results 状态，实际 {}", other.name()),
        }
    }

    #[test]
    fn test_outcome_after_reset_is_discarded() {
        let mut session = AnalysisSession::new();

        let ticket = session.begin_submit();
        session.reset();

        assert!(!session.complete_submit(ticket, ok_outcome()));
        assert!(matches!(session.state(), SessionState::Initial));
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_stale_failure_does_not_enqueue_notification() {
        let mut session = AnalysisSession::new();

        let first = session.begin_submit();
        let _second = session.begin_submit();

        assert!(!session.complete_submit(
            first,
            Err(AppError::generation_empty("strategy").into())
        ));
        assert!(matches!(session.state(), SessionState::Loading));
        assert!(session.take_notifications().is_empty());
    }
}
