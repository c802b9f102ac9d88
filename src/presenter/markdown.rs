//! Markdown 终端渲染 - 展示层
//!
//! ## 职责
//! - 把 LLM 返回的 markdown 文本转成终端可读的纯文本排版
//! - 标题转下划线标题、列表转圆点、去掉加粗斜体标记

use regex::Regex;

/// 把 markdown 文本逐行转成终端排版
///
/// 转换规则:
/// - `# 标题` 转为标题加一行 `=` 下划线
/// - `## 标题` 转为标题加一行 `─` 下划线
/// - `### 标题` 转为 `◆ 标题`
/// - `- ` / `* ` 列表项转为 `  • ` 圆点
/// - `**加粗**` 和 `*斜体*` 只保留文字
/// - 连续三个以上换行压成一个空行
///
/// # 示例
/// ```
/// use pdf_insights::presenter::render_markdown;
///
/// let text = render_markdown("## Key Points\n- **First** point");
/// assert_eq!(text, "Key Points\n──────────────────────────────\n  • First point");
/// ```
pub fn render_markdown(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_end();

        if let Some(title) = trimmed.strip_prefix("### ") {
            lines.push(format!("◆ {}", strip_inline_markers(title)));
        } else if let Some(title) = trimmed.strip_prefix("## ") {
            lines.push(strip_inline_markers(title));
            lines.push("─".repeat(30));
        } else if let Some(title) = trimmed.strip_prefix("# ") {
            lines.push(strip_inline_markers(title));
            lines.push("=".repeat(60));
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            lines.push(format!("  • {}", strip_inline_markers(item)));
        } else {
            lines.push(strip_inline_markers(trimmed));
        }
    }

    collapse_blank_runs(&lines.join("\n"))
}

/// 去掉行内的加粗与斜体标记，只保留文字
fn strip_inline_markers(text: &str) -> String {
    let mut out = text.to_string();

    // 先处理加粗，顺序反了会把 ** 拆成两个斜体标记
    if let Ok(re) = Regex::new(r"\*\*([^*]+)\*\*") {
        out = re.replace_all(&out, "$1").to_string();
    }
    if let Ok(re) = Regex::new(r"\*([^*]+)\*") {
        out = re.replace_all(&out, "$1").to_string();
    }

    out
}

/// 把连续三个以上的换行压成一个空行
fn collapse_blank_runs(text: &str) -> String {
    if let Ok(re) = Regex::new(r"\n{3,}") {
        re.replace_all(text, "\n\n").to_string()
    } else {
        text.to_string()
    }
}
