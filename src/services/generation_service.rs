//! 内容生成服务 - 业务能力层
//!
//! 封装三个独立的生成任务：文档摘要、7 天行动计划、配套测验。
//! 每个任务都是"一段提取文本进，一份校验过的结果出"，不关心流程顺序，
//! 也不关心三个任务之间如何并发。
//!
//! ## 边界校验
//! - 摘要 / 计划：非空文本
//! - 测验：严格 JSON schema（标题 + 恰好 10 道题，每题 4 个选项）
//! - 任何校验失败都按生成失败处理，绝不产出部分结果

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, GenerationError};
use crate::models::Quiz;
use crate::services::llm_service::LlmService;
use crate::utils::logging::truncate_text;

/// 生成任务标识（用于日志和错误信息）
pub const TASK_SUMMARY: &str = "summary";
pub const TASK_STRATEGY: &str = "strategy";
pub const TASK_QUIZ: &str = "quiz";

/// 摘要任务的系统提示词
const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert at summarizing documents. \
The output should be formatted in markdown, with a main heading for the summary \
and subheadings for key sections. Use paragraphs and lists to structure the \
content for readability. Output only the summary itself, with no commentary.";

/// 7 天计划任务的系统提示词
const STRATEGY_SYSTEM_PROMPT: &str = "You are an expert in creating actionable \
weekly strategies based on document content. Generate a detailed 7-day strategy \
that the user can implement, with one concrete section per day. Output only the \
strategy itself, with no commentary.";

/// 测验任务的系统提示词
///
/// 输出必须是裸 JSON：下游按固定 schema 解析并严格校验。
const QUIZ_SYSTEM_PROMPT: &str = r#"You are an expert educator specializing in generating engaging and challenging quiz questions from documents.

You will use the content of the document provided to generate a quiz with a title and a set of exactly 10 multiple-choice questions that assess the user's understanding of the material. Each question must have exactly 4 options.

Return ONLY a JSON object, with no commentary and no markdown code fences, in exactly this shape:

{
  "quiz": {
    "title": "A title for the quiz",
    "questions": [
      {
        "question": "The quiz question",
        "options": ["first option", "second option", "third option", "fourth option"],
        "answerIndex": 0,
        "explanation": "A brief explanation for the correct answer"
      }
    ]
  }
}

"answerIndex" is the 0-based index of the correct answer in the options array."#;

/// 测验响应的外层结构
#[derive(Debug, Deserialize)]
struct QuizEnvelope {
    quiz: Quiz,
}

/// 内容生成服务
///
/// 职责：
/// - 为三个生成任务构建 prompt 并调用 LLM
/// - 在边界上解析、校验模型输出
/// - 只处理单次调用，不出现 AnalysisResult
/// - 不关心流程顺序
pub struct GenerationService {
    llm: LlmService,
}

impl GenerationService {
    /// 创建新的生成服务
    pub fn new(config: &Config) -> Self {
        Self {
            llm: LlmService::new(config),
        }
    }

    /// 生成文档摘要（markdown 格式）
    ///
    /// # 参数
    /// - `pdf_text`: 完整的提取文本，不做截断
    ///
    /// # 返回
    /// 返回非空的摘要文本
    pub async fn generate_summary(&self, pdf_text: &str) -> Result<String> {
        debug!("开始生成文档摘要，输入长度: {} 字符", pdf_text.len());

        let user_message = format!(
            "Summarize the following PDF content in a concise manner.\n\nPDF Content:\n{}",
            pdf_text
        );

        let summary = self
            .send_task(TASK_SUMMARY, &user_message, SUMMARY_SYSTEM_PROMPT)
            .await?;

        debug!("摘要生成完成，长度: {} 字符", summary.chars().count());
        Ok(summary)
    }

    /// 生成 7 天行动计划
    pub async fn generate_weekly_strategy(&self, pdf_text: &str) -> Result<String> {
        debug!("开始生成 7 天计划，输入长度: {} 字符", pdf_text.len());

        let user_message = format!(
            "Analyze the following PDF content and generate a detailed 7-day strategy \
             that the user can implement.\n\nPDF Content:\n{}",
            pdf_text
        );

        let strategy = self
            .send_task(TASK_STRATEGY, &user_message, STRATEGY_SYSTEM_PROMPT)
            .await?;

        debug!("7 天计划生成完成，长度: {} 字符", strategy.chars().count());
        Ok(strategy)
    }

    /// 生成配套测验
    ///
    /// # 返回
    /// 返回通过严格 schema 校验的 `Quiz`
    pub async fn generate_quiz(&self, pdf_text: &str) -> Result<Quiz> {
        debug!("开始生成测验，输入长度: {} 字符", pdf_text.len());

        let user_message = format!("Document Content:\n{}", pdf_text);

        let response = self
            .send_task(TASK_QUIZ, &user_message, QUIZ_SYSTEM_PROMPT)
            .await?;

        let quiz = self.parse_quiz_response(&response)?;

        debug!(
            "测验生成完成: {} ({} 道题)",
            quiz.title,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// 发送单个生成任务并做非空校验
    async fn send_task(
        &self,
        task: &'static str,
        user_message: &str,
        system_message: &str,
    ) -> Result<String> {
        let response = self
            .llm
            .send_to_llm(user_message, Some(system_message))
            .await
            .map_err(|e| {
                AppError::Generation(GenerationError::ApiCallFailed {
                    task,
                    model: self.llm.model_name().to_string(),
                    source: e.into(),
                })
            })?;

        if response.trim().is_empty() {
            return Err(AppError::generation_empty(task).into());
        }

        Ok(response)
    }

    /// 解析测验任务的 LLM 响应
    ///
    /// 容忍两种形态：带 `{"quiz": ...}` 外层的标准形态，
    /// 以及模型偶尔直接返回的裸测验对象。
    fn parse_quiz_response(&self, response: &str) -> Result<Quiz> {
        let json_text = strip_markdown_fences(response);

        let quiz = match serde_json::from_str::<QuizEnvelope>(&json_text) {
            Ok(envelope) => envelope.quiz,
            Err(envelope_err) => match serde_json::from_str::<Quiz>(&json_text) {
                Ok(quiz) => quiz,
                Err(_) => {
                    warn!(
                        "测验响应无法解析为 JSON: {}",
                        truncate_text(response, 200)
                    );
                    return Err(AppError::generation_json_failed(TASK_QUIZ, envelope_err).into());
                }
            },
        };

        quiz.validate()
            .map_err(|detail| AppError::generation_schema_violation(TASK_QUIZ, detail))?;

        Ok(quiz)
    }
}

/// 去掉响应外层的 markdown 代码围栏（如果有）
///
/// 模型即使被要求输出裸 JSON，也经常包上 ```json ... ``` 围栏。
fn strip_markdown_fences(text: &str) -> String {
    let text = text.trim();
    if text.starts_with("```") {
        text.lines()
            .skip(1)
            .take_while(|l| !l.starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        text.to_string()
    }
}
