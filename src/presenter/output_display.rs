//! 结果展示 - 展示层
//!
//! ## 职责
//! - 把分析结果渲染成终端上的三个标签区块 (Summary / Strategy / Quiz)
//! - 渲染测验的题目卡片、作答反馈和完成页
//! - 渲染弹出式通知与内联错误

use chrono::{Datelike, Local};

use crate::models::QuizQuestion;
use crate::presenter::markdown::render_markdown;
use crate::presenter::quiz_session::{AnswerState, QuizSession};

/// 应用启动横幅
pub fn render_app_banner() -> String {
    format!(
        "{}\n📄 PDF Insights\nUpload a PDF to instantly generate a concise summary, \
         an actionable weekly plan, and a helpful quiz.\n{}",
        "=".repeat(60),
        "=".repeat(60)
    )
}

/// 分析进行中的提示
pub fn render_loading_notice() -> String {
    "⏳ Analyzing your document...\nThis may take a moment. We're reading your document \
     and generating a summary, a weekly strategy, and a custom quiz just for you."
        .to_string()
}

/// 标签区块的标题栏
fn render_tab_header(icon: &str, title: &str) -> String {
    format!("\n{}\n{} {}\n{}", "=".repeat(60), icon, title, "=".repeat(60))
}

/// Summary 区块: 标题栏加渲染后的摘要正文
pub fn render_summary_section(summary: &str) -> String {
    format!(
        "{}\n{}",
        render_tab_header("📖", "Summary"),
        render_markdown(summary)
    )
}

/// Strategy 区块: 标题栏加渲染后的 7 天计划
pub fn render_strategy_section(strategy: &str) -> String {
    format!(
        "{}\n{}",
        render_tab_header("🧠", "Strategy"),
        render_markdown(strategy)
    )
}

/// Quiz 区块的标题栏与测验名
pub fn render_quiz_header(title: &str) -> String {
    format!("{}\n{}", render_tab_header("📝", "Quiz"), title)
}

/// 一张题目卡片: 进度、题干、编号 1-4 的选项和输入提示
pub fn render_question(question: &QuizQuestion, position: (usize, usize)) -> String {
    let (current, total) = position;
    // 进度条按已完成的题数计算，第一题为 0%
    let percent = if total > 0 {
        (current - 1) * 100 / total
    } else {
        0
    };

    let mut card = format!(
        "\nQuestion {} / {}  ({}% complete)\n\n{}\n\n",
        current, total, percent, question.question
    );
    for (i, option) in question.options.iter().enumerate() {
        card.push_str(&format!("  {}. {}\n", i + 1, option));
    }
    card.push_str(&format!("\nChoose an option (1-{}):", question.options.len()));

    card
}

/// 作答后的即时反馈: 对错判定、正确答案和解析
///
/// 未作答时返回空串。
pub fn render_feedback(session: &QuizSession) -> String {
    let question = match session.current_question() {
        Some(q) => q,
        None => return String::new(),
    };

    let verdict = match session.answer_state() {
        AnswerState::Unanswered => return String::new(),
        AnswerState::Correct => "✅ Correct!".to_string(),
        AnswerState::Incorrect => format!(
            "❌ Incorrect.\nThe correct answer was {}. {}",
            question.answer_index + 1,
            question.options[question.answer_index]
        ),
    };

    let (current, total) = session.position();
    let next_hint = if current < total {
        "(Enter: Next Question)"
    } else {
        "(Enter: Finish Quiz)"
    };

    format!("{}\n{}\n{}", verdict, question.explanation, next_hint)
}

/// 测验完成页
pub fn render_completion(score: usize, total: usize) -> String {
    format!(
        "\n{}\n🎉 Quiz Completed!\nYou scored {} out of {}.\n{}",
        "=".repeat(60),
        score,
        total,
        "=".repeat(60)
    )
}

/// 弹出式通知
pub fn render_toast(title: &str, detail: &str) -> String {
    format!("🔔 {}: {}", title, detail)
}

/// 内联错误区块
pub fn render_error(message: &str) -> String {
    format!(
        "\n❌ Analysis Failed\n{}\nUpload another file and run again.",
        message
    )
}

/// 页脚
pub fn render_footer() -> String {
    format!(
        "© {} PDF Insights. Powered by Gemini.",
        Local::now().year()
    )
}
