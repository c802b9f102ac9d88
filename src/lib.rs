//! # PDF Insights
//!
//! 一个把 PDF 文档变成学习材料的 Rust 应用程序:
//! 上传一份 PDF，并发生成摘要、7 天学习计划和一套互动测验。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单一能力
//! - `PdfExtractor` - PDF 逐页文本提取能力
//! - `LlmService` - LLM 对话能力
//! - `GenerationService` - 摘要 / 7 天计划 / 测验的生成能力
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一份文档"的完整分析流程
//! - `AnalysisCtx` - 上下文封装（file_name + generation）
//! - `AnalysisFlow` - 流程编排（extract → 并发生成 → 聚合）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/session` - 分析会话状态机，丢弃过期结果
//! - `orchestrator/app` - 应用主控，管理一次运行的生命周期
//!
//! ### ④ 展示层（Presenter）
//! - `presenter/` - markdown 终端排版、测验进度与区块渲染
//!
//! ## 模块结构

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod presenter;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnalysisResult, DocumentText, Quiz, QuizQuestion};
pub use orchestrator::{AnalysisSession, App, SessionState};
pub use presenter::{render_markdown, QuizSession};
pub use services::{GenerationService, LlmService, PdfExtractor};
pub use workflow::{AnalysisCtx, AnalysisFlow};
