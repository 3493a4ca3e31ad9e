//! OpenAI-compatible gateway
//!
//! Talks to any server exposing `POST {base_url}/chat/completions`
//! (OpenAI, Azure-style proxies, vLLM, Ollama's compatibility layer).

use super::session::OpenAiSession;
use crate::config::FileBackendConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tag_quorum_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use tag_quorum_domain::Model;
use tracing::info;

const USER_AGENT: &str = concat!("tag-quorum/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by every session of one gateway
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Transport-level bound; the use case applies its own per-call timeout too
    pub request_timeout: Duration,
}

impl OpenAiSettings {
    pub fn from_backend(config: &FileBackendConfig, api_key: String) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout: Duration::from_secs(config.timeout_secs.max(1)),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

pub struct OpenAiGateway {
    client: reqwest::Client,
    settings: Arc<OpenAiSettings>,
}

impl OpenAiGateway {
    /// Create a gateway; fails only if the HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(endpoint = %settings.endpoint(), "OpenAI-compatible backend configured");

        Ok(Self {
            client,
            settings: Arc::new(settings),
        })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.settings),
            model.clone(),
            Some(system_prompt),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let mut settings =
            OpenAiSettings::from_backend(&FileBackendConfig::default(), "sk-test".to_string());
        assert_eq!(
            settings.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );

        settings.base_url = "http://localhost:11434/v1/".to_string();
        assert_eq!(
            settings.endpoint(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_settings_from_backend() {
        let config = FileBackendConfig {
            temperature: 0.1,
            max_tokens: 256,
            timeout_secs: 15,
            ..Default::default()
        };
        let settings = OpenAiSettings::from_backend(&config, "sk-test".to_string());
        assert_eq!(settings.temperature, 0.1);
        assert_eq!(settings.max_tokens, 256);
        assert_eq!(settings.request_timeout, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_opening_a_session_makes_no_request() {
        let mut settings =
            OpenAiSettings::from_backend(&FileBackendConfig::default(), "sk-test".to_string());
        settings.base_url = "http://127.0.0.1:9".to_string();
        let gateway = OpenAiGateway::new(settings).unwrap();

        let session = gateway
            .create_session_with_system_prompt(&Model::Gpt4oMini, "system")
            .await;
        assert!(session.is_ok());
        assert_eq!(gateway.settings().max_tokens, 1000);
    }
}
