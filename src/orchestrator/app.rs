//! 应用主控 - 编排层
//!
//! ## 职责
//! - 初始化运行日志与分析流程
//! - 读取 PDF 文件，驱动会话完成一次分析
//! - 渲染三个结果区块，主持互动测验

use anyhow::Result;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, FileError};
use crate::models::{AnalysisResult, Quiz, OPTION_COUNT};
use crate::orchestrator::session::{AnalysisSession, SessionState};
use crate::presenter::output_display;
use crate::presenter::QuizSession;
use crate::utils::logging;
use crate::workflow::AnalysisFlow;

/// 应用主结构
pub struct App {
    config: Config,
    flow: AnalysisFlow,
    session: AnalysisSession,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化运行日志文件
        logging::init_log_file(&config.output_log_file)?;

        log_startup(&config);

        if config.llm_api_key.is_empty() {
            warn!("⚠️ 未配置 LLM_API_KEY，生成请求将被服务端拒绝");
        }

        let flow = AnalysisFlow::new(&config);

        Ok(Self {
            config,
            flow,
            session: AnalysisSession::new(),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        let started_at = std::time::Instant::now();

        println!("{}", output_display::render_app_banner());

        // ========== 流程 1: 读取 PDF 文件 ==========
        let bytes = read_document(&self.config).await?;
        let file_name = document_file_name(&self.config.pdf_path);

        // ========== 流程 2: 提交分析 ==========
        println!("{}", output_display::render_loading_notice());
        self.session.submit(&self.flow, &file_name, &bytes).await;

        for notification in self.session.take_notifications() {
            println!(
                "{}",
                output_display::render_toast(&notification.title, &notification.detail)
            );
        }

        // ========== 流程 3: 展示结果 ==========
        match self.session.state() {
            SessionState::Results(result) => {
                let result = result.clone();
                self.present_results(&result).await?;
            }
            SessionState::Error { message } => {
                println!("{}", output_display::render_error(message));
                logging::append_log_line(
                    &self.config.output_log_file,
                    &format!("分析失败: {}", message),
                )?;
            }
            // submit 返回后必然处于终态
            _ => {}
        }

        println!("\n{}", output_display::render_footer());
        print_final_stats(started_at.elapsed(), &self.config);

        Ok(())
    }

    /// 渲染三个结果区块并主持测验
    async fn present_results(&self, result: &AnalysisResult) -> Result<()> {
        println!("{}", output_display::render_summary_section(&result.summary));
        println!(
            "{}",
            output_display::render_strategy_section(&result.strategy)
        );

        logging::append_log_line(
            &self.config.output_log_file,
            &format!(
                "分析成功: 摘要 {} 字符, 7 天计划 {} 字符, 测验 {} 道题",
                result.summary.chars().count(),
                result.strategy.chars().count(),
                result.quiz.questions.len()
            ),
        )?;

        let final_score = run_interactive_quiz(result.quiz.clone()).await?;
        logging::append_log_line(
            &self.config.output_log_file,
            &format!("测验得分: {}/{}", final_score, result.quiz.questions.len()),
        )?;

        Ok(())
    }
}

/// 主持互动测验: 逐题作答、即时反馈，可重复测验
///
/// 输入流结束时提前收卷，返回当前得分。
async fn run_interactive_quiz(quiz: Quiz) -> Result<usize> {
    let mut session = QuizSession::new(quiz);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", output_display::render_quiz_header(session.title()));

    loop {
        // 逐题作答
        while !session.is_finished() {
            let card = match session.current_question() {
                Some(question) => output_display::render_question(question, session.position()),
                None => break,
            };
            println!("{}", card);

            let input = match lines.next_line().await? {
                Some(line) => line,
                None => {
                    warn!("⚠️ 输入流已结束，测验提前收卷");
                    return Ok(session.score());
                }
            };

            let choice = match input.trim().parse::<usize>() {
                Ok(n) if (1..=OPTION_COUNT).contains(&n) => n - 1,
                _ => {
                    println!("Please enter a number from 1 to {}.", OPTION_COUNT);
                    continue;
                }
            };

            if !session.select_option(choice) {
                continue;
            }

            println!("{}", output_display::render_feedback(&session));

            // 等待回车进入下一题
            if lines.next_line().await?.is_none() {
                warn!("⚠️ 输入流已结束，测验提前收卷");
                return Ok(session.score());
            }
            session.advance();
        }

        println!(
            "{}",
            output_display::render_completion(session.score(), session.total())
        );

        println!("Retake Quiz? (y/n):");
        match lines.next_line().await? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                session.restart();
            }
            _ => break,
        }
    }

    Ok(session.score())
}

// ========== 文件读取 ==========

/// 读取待分析的 PDF 文件
async fn read_document(config: &Config) -> Result<Vec<u8>> {
    let path = Path::new(&config.pdf_path);
    if !path.exists() {
        return Err(AppError::File(FileError::NotFound {
            path: config.pdf_path.clone(),
        })
        .into());
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(config.pdf_path.as_str(), e))?;

    let size_mb = bytes.len() as f64 / (1024.0 * 1024.0);
    info!("📂 已读取 {} ({:.2} MB)", config.pdf_path, size_mb);

    // Max file size 20MB: 超限只提醒，不拒绝
    if bytes.len() as u64 > config.max_file_size_mb * 1024 * 1024 {
        warn!(
            "⚠️ 文件大小 {:.2} MB 超过建议上限 {} MB",
            size_mb, config.max_file_size_mb
        );
    }

    Ok(bytes)
}

/// 从路径中取出文件名用于日志标识
fn document_file_name(pdf_path: &str) -> String {
    Path::new(pdf_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(pdf_path)
        .to_string()
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 智能分析模式");
    info!("📄 文件路径: {}", config.pdf_path);
    info!("🤖 使用模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(elapsed: std::time::Duration, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 本次分析结束");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("总耗时: {:.1}s", elapsed.as_secs_f64());
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
