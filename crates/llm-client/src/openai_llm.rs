//! OpenAI-compatible [`LlmClient`]: wraps openai-client, optional system message, bounded by a timeout.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use std::time::Duration;
use tracing::{instrument, warn};

use super::{chat_message_to_openai, LlmClient, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// [`LlmClient`] backed by [`openai_client::OpenAIClient`].
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    temperature: Option<f32>,
    timeout: Duration,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self::from_client(openai_client::OpenAIClient::new(api_key))
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_client(openai_client::OpenAIClient::with_base_url(api_key, base_url))
    }

    fn from_client(client: openai_client::OpenAIClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.0),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Messages as sent to the API: system prompt first when configured.
    fn build_messages(&self, messages: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut out = Vec::with_capacity(messages.len() + 1);
        if let Some(ref system) = self.system_prompt {
            out.push(ChatMessage::system(system.clone()));
        }
        out.extend(messages.iter().cloned());
        out
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = self
            .build_messages(&messages)
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        let call = self
            .client
            .chat_completion(&self.model, openai_messages, self.temperature);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "LLM request timed out");
                anyhow::bail!(
                    "LLM request timed out after {} seconds",
                    self.timeout.as_secs()
                )
            }
        }
    }
}
