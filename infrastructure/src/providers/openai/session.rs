//! OpenAI-compatible LLM session implementation
//!
//! The chat completions API is stateless, so the session keeps its own
//! message history and sends it in full on every call.

use super::gateway::OpenAiSettings;
use super::types::{self, ChatMessage, ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tag_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use tag_quorum_domain::Model;
use tokio::sync::Mutex;
use tracing::debug;

pub struct OpenAiSession {
    client: reqwest::Client,
    settings: Arc<OpenAiSettings>,
    model: Model,
    messages: Mutex<Vec<ChatMessage>>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        settings: Arc<OpenAiSettings>,
        model: Model,
        system_prompt: Option<&str>,
    ) -> Self {
        let messages = system_prompt
            .filter(|p| !p.is_empty())
            .map(|p| vec![ChatMessage::system(p)])
            .unwrap_or_default();

        Self {
            client,
            settings,
            model,
            messages: Mutex::new(messages),
        }
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: self.model.as_str(),
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            "Calling chat completions API"
        );

        let response = self
            .client
            .post(self.settings.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(types::convert_http_error(status.as_u16(), &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if let Some(reason) = body.choices.first().and_then(|c| c.finish_reason.as_deref())
            && reason == "length"
        {
            debug!(model = %self.model, "Reply was cut at max_tokens");
        }

        types::extract_reply(body)
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.push(ChatMessage::user(content));

        let reply = self.complete(&messages).await?;
        messages.push(ChatMessage::assistant(reply.clone()));

        Ok(reply)
    }
}
