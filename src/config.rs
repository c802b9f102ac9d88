/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 待分析的 PDF 文件路径
    pub pdf_path: String,
    /// 文件大小软限制（MB，仅提示不拦截）
    pub max_file_size_mb: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_path: "document.pdf".to_string(),
            max_file_size_mb: 20,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            pdf_path: std::env::var("PDF_PATH").unwrap_or(default.pdf_path),
            max_file_size_mb: std::env::var("MAX_FILE_SIZE_MB").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_file_size_mb),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
