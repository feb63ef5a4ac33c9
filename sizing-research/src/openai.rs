use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use sizing_core::{SizingError, SizingResult};
use tracing::{debug, instrument};

use crate::config::{ProviderConfig, DEFAULT_OPENAI_MODEL};
use crate::prompts::SYSTEM_MESSAGE;
use crate::provider::{extract_json, ReasoningClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIClient {
    pub fn new(config: &ProviderConfig) -> SizingResult<Self> {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.base_url())
            .with_api_key(&config.api_key);

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SizingError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ReasoningClient for OpenAIClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: &str, expect_json: bool) -> SizingResult<String> {
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.model).messages([
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_MESSAGE)
                .build()
                .map_err(|e| SizingError::internal(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| SizingError::internal(e.to_string()))?
                .into(),
        ]);
        if expect_json {
            builder.response_format(ResponseFormat::JsonObject);
        }
        let request = builder
            .build()
            .map_err(|e| SizingError::internal(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SizingError::upstream(format!("OpenAI API error: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SizingError::malformed("No response from OpenAI"))?;

        debug!("OpenAI reply: {} chars", content.len());
        validate_reply(content, expect_json)
    }
}

/// Raw text passes through; a JSON-mode reply must hold a parseable JSON object
fn validate_reply(content: String, expect_json: bool) -> SizingResult<String> {
    if !expect_json {
        return Ok(content);
    }

    let json_str = extract_json(&content)?;
    serde_json::from_str::<serde_json::Value>(&json_str)
        .map_err(|e| SizingError::malformed(format!("Reply is not valid JSON: {}", e)))?;

    Ok(json_str)
}
