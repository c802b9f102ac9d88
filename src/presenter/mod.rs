//! 展示层 - 终端渲染与测验互动
//!
//! 只负责"怎么呈现": markdown 排版、测验进度推进、各区块的文本渲染。
//! 不持有会话状态，也不发起任何网络调用。

pub mod markdown;
pub mod output_display;
pub mod quiz_session;

pub use markdown::render_markdown;
pub use quiz_session::{AnswerState, QuizSession};
