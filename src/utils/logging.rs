//! 日志工具模块
//!
//! 提供日志初始化、运行日志文件和文本截断的辅助函数

use anyhow::Result;
use std::fs;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 默认 info 级别，可通过 RUST_LOG 环境变量覆盖。
/// 重复调用时保持已有的订阅者不变。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 初始化运行日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
///
/// # 返回
/// 返回是否成功初始化
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nPDF 分析日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一行到运行日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `line`: 要追加的内容
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
