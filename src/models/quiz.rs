use serde::{Deserialize, Serialize};

/// 每套测验的题目数（prompt 约定，严格校验）
pub const QUESTION_COUNT: usize = 10;

/// 每道题的选项数（prompt 约定，严格校验）
pub const OPTION_COUNT: usize = 4;

/// 单道选择题
///
/// 字段名与模型输出的 JSON 保持一致（camelCase，`answerIndex` 为 0-based）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// 题目内容
    pub question: String,
    /// 选项列表（约定恰好 4 个）
    pub options: Vec<String>,
    /// 正确选项的索引（0-based）
    pub answer_index: usize,
    /// 正确答案的解析
    pub explanation: String,
}

/// 一套完整的测验
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// 测验标题
    pub title: String,
    /// 题目列表（顺序固定，约定恰好 10 道）
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// 校验测验是否符合 prompt 约定的 schema
    ///
    /// 模型输出不满足约定时返回具体原因，调用方应将其视为生成失败
    /// 而不是部分成功。
    ///
    /// # 返回
    /// 通过返回 `Ok(())`，否则返回违反约定的描述
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("quiz title is empty".to_string());
        }

        if self.questions.len() != QUESTION_COUNT {
            return Err(format!(
                "expected {} questions, got {}",
                QUESTION_COUNT,
                self.questions.len()
            ));
        }

        for (idx, question) in self.questions.iter().enumerate() {
            let number = idx + 1; // 题号从 1 开始
            if question.question.trim().is_empty() {
                return Err(format!("question {} has empty text", number));
            }
            if question.options.len() != OPTION_COUNT {
                return Err(format!(
                    "question {} has {} options, expected {}",
                    number,
                    question.options.len(),
                    OPTION_COUNT
                ));
            }
            if question.options.iter().any(|o| o.trim().is_empty()) {
                return Err(format!("question {} has an empty option", number));
            }
            if question.answer_index >= OPTION_COUNT {
                return Err(format!(
                    "question {} answerIndex {} out of range [0, {}]",
                    number,
                    question.answer_index,
                    OPTION_COUNT - 1
                ));
            }
            if question.explanation.trim().is_empty() {
                return Err(format!("question {} has an empty explanation", number));
            }
        }

        Ok(())
    }
}

/// 构造一套合法的测验（仅测试使用）
#[cfg(test)]
pub(crate) fn sample_quiz() -> Quiz {
    let questions = (0..QUESTION_COUNT)
        .map(|i| QuizQuestion {
            question: format!("Question {}?", i + 1),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            answer_index: i % OPTION_COUNT,
            explanation: format!("Explanation {}", i + 1),
        })
        .collect();

    Quiz {
        title: "Sample Quiz".to_string(),
        questions,
    }
}
