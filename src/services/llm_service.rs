//! LLM 服务 - 业务能力层
//!
//! 只负责"发送一次对话请求"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini OpenAI 兼容端点、Azure 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;

/// LLM 服务
///
/// 职责：
/// - 持有 API 客户端和模型名
/// - 提供通用的单次请求接口
/// - 不包含任何 prompt 模板
/// - 不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 当前使用的模型名
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，三个生成任务都基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白的字符串）
    ///
    /// # 示例
    /// ```no_run
    /// # use pdf_insights::services::LlmService;
    /// # async fn example(service: &LlmService) -> anyhow::Result<()> {
    /// let response = service
    ///     .send_to_llm("Summarize this text: ...", Some("You are a helpful assistant."))
    ///     .await?;
    /// println!("LLM 响应: {}", response);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        // max_tokens 要容得下 10 道题的完整 JSON
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.3)
            .max_tokens(4096u32)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API call failed: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM returned an empty response"))?;

        Ok(content.trim().to_string())
    }
}
