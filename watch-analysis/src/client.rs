use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, instrument};
use watch_core::{AnalysisRequest, NewsAnalyst, WatchError, WatchResult};

use crate::prompt::{build_prompt, SYSTEM_PROMPT};

/// Gemini's OpenAI-compatible endpoint
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Largest instruction-tuned Gemma 3 model
pub const DEFAULT_MODEL: &str = "gemma-3-27b-it";

#[derive(Debug, Clone)]
pub struct LlmAnalyst {
    client: Client<OpenAIConfig>,
    model: String,
}

impl LlmAnalyst {
    /// Create an analyst; a blank key is a configuration error
    pub fn new(api_key: &str, api_base: &str) -> WatchResult<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(WatchError::config_missing(
                "GEMINI_API_KEY is not set; analysis is disabled",
            ));
        }

        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(config),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        if !model.trim().is_empty() {
            self.model = model.trim().to_string();
        }
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, user_prompt: String) -> WatchResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| WatchError::internal(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| WatchError::internal(e.to_string()))?
                    .into(),
            ])
            .temperature(0.3)
            .build()
            .map_err(|e| WatchError::internal(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| WatchError::analysis(format!("Model API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(WatchError::analysis("Empty response from model"));
        }

        Ok(content)
    }
}

#[async_trait]
impl NewsAnalyst for LlmAnalyst {
    #[instrument(skip(self, request), fields(code = %request.code, title = %request.title))]
    async fn analyze(&self, request: &AnalysisRequest) -> WatchResult<String> {
        let prompt = build_prompt(request);
        debug!("Requesting analysis from {} ({} prompt chars)", self.model, prompt.chars().count());
        self.chat(prompt).await
    }
}
