//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责会话生命周期与流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用主控
//! - 管理应用生命周期（初始化、运行、统计）
//! - 读取 PDF 文件并发起分析
//! - 渲染结果区块，主持互动测验
//! - 输出运行日志与最终统计
//!
//! ### `session` - 分析会话状态机
//! - 维护状态流转（initial → loading → results / error）
//! - 代次计数器丢弃过期结果
//! - 失败时产出内联错误与弹出式通知
//!
//! ## 层次关系
//!
//! ```text
//! app (一次运行)
//!     ↓
//! session (一次提交的状态流转)
//!     ↓
//! workflow::AnalysisFlow (单份文档的分析流程)
//!     ↓
//! services (能力层：extract / llm / generation)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管运行，session 管状态
//! 2. **资源隔离**：只有编排层读文件和触碰 stdin
//! 3. **向下依赖**：编排层 → workflow → services
//! 4. **无业务逻辑**：只做调度和状态流转，不做具体分析

pub mod app;
pub mod session;

// 重新导出主要类型
pub use app::App;
pub use session::{AnalysisSession, Notification, SessionState, SubmitTicket};
