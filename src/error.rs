use crate::services::pdf_extractor::ExtractError;
use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// PDF 文本提取错误
    Extract(ExtractError),
    /// 内容生成错误
    Generation(GenerationError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Extract(e) => write!(f, "{}", e),
            AppError::Generation(e) => write!(f, "{}", e),
            AppError::File(e) => write!(f, "{}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Extract(e) => Some(e),
            AppError::Generation(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 内容生成错误
///
/// 三个生成任务（summary / strategy / quiz）共用的错误类型，
/// `task` 字段标识是哪个任务出的问题。
#[derive(Debug)]
pub enum GenerationError {
    /// API 调用失败（网络 / 限流 / 服务端错误）
    ApiCallFailed {
        task: &'static str,
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 模型返回了空内容
    EmptyContent {
        task: &'static str,
    },
    /// JSON 解析失败
    JsonParseFailed {
        task: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 响应不符合约定的 schema
    SchemaViolation {
        task: &'static str,
        detail: String,
    },
    /// 聚合时发现多个任务失败
    Incomplete,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::ApiCallFailed {
                task,
                model,
                source,
            } => {
                write!(
                    f,
                    "{} generation request failed (model: {}): {}",
                    task, model, source
                )
            }
            GenerationError::EmptyContent { task } => {
                write!(f, "the model returned empty content for the {} step", task)
            }
            GenerationError::JsonParseFailed { task, source } => {
                write!(f, "failed to parse the {} response as JSON: {}", task, source)
            }
            GenerationError::SchemaViolation { task, detail } => {
                write!(
                    f,
                    "the {} response violates the expected schema: {}",
                    task, detail
                )
            }
            GenerationError::Incomplete => {
                write!(f, "one or more generation steps failed to return content")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::ApiCallFailed { source, .. }
            | GenerationError::JsonParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "file not found: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "failed to read file {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON error: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建生成 API 调用错误
    pub fn generation_api_failed(
        task: &'static str,
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Generation(GenerationError::ApiCallFailed {
            task,
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建空内容错误
    pub fn generation_empty(task: &'static str) -> Self {
        AppError::Generation(GenerationError::EmptyContent { task })
    }

    /// 创建 JSON 解析错误
    pub fn generation_json_failed(
        task: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Generation(GenerationError::JsonParseFailed {
            task,
            source: Box::new(source),
        })
    }

    /// 创建 schema 校验错误
    pub fn generation_schema_violation(task: &'static str, detail: impl Into<String>) -> Self {
        AppError::Generation(GenerationError::SchemaViolation {
            task,
            detail: detail.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
