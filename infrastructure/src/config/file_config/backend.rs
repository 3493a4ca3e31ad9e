//! Backend configuration from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tag_quorum_application::CallPolicy;
use tag_quorum_domain::{ConfigIssue, ConfigIssueCode, Model};

/// Raw configuration of the OpenAI-compatible text-generation backend
///
/// # Example
///
/// ```toml
/// [backend]
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"   # env var holding the key
/// model = "gpt-4o"
/// moderator_model = "gpt-4.1"      # defaults to `model`
/// temperature = 0.7
/// max_tokens = 1000
/// timeout_secs = 60
/// max_retries = 1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    pub base_url: String,
    /// Name of the environment variable the API key is read from
    pub api_key_env: String,
    /// API key given directly; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    pub model: String,
    pub moderator_model: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Bound on each backend call
    pub timeout_secs: u64,
    /// Retries after the first failed attempt
    pub max_retries: usize,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: Model::default().to_string(),
            moderator_model: None,
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 60,
            max_retries: 1,
        }
    }
}

impl FileBackendConfig {
    /// API key from the config value, else from the configured env var
    pub fn resolve_api_key(&self) -> Option<String> {
        let non_blank = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var(&self.api_key_env).ok().filter(non_blank))
    }

    pub fn evaluator_model(&self) -> Model {
        Model::from(self.model.trim())
    }

    pub fn moderator_model(&self) -> Model {
        self.moderator_model
            .as_deref()
            .map(|m| Model::from(m.trim()))
            .unwrap_or_else(|| self.evaluator_model())
    }

    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("backend.base_url", Some(&self.base_url)),
            ("backend.model", Some(&self.model)),
            ("backend.moderator_model", self.moderator_model.as_ref()),
        ] {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{}: value cannot be empty", field),
                ));
            }
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "backend.timeout_secs".to_string(),
                },
                "backend.timeout_secs cannot be 0",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "backend.temperature".to_string(),
                },
                format!(
                    "backend.temperature {} is outside 0.0-2.0 and may be rejected",
                    self.temperature
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileBackendConfig::default();
        assert_eq!(config.evaluator_model(), Model::Gpt4o);
        assert_eq!(config.moderator_model(), Model::Gpt4o);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.call_policy(), CallPolicy::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = FileBackendConfig {
            api_key: Some("sk-inline".to_string()),
            api_key_env: "TAG_QUORUM_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-inline"));
    }

    #[test]
    fn test_blank_key_is_no_key() {
        let config = FileBackendConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "TAG_QUORUM_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_custom_moderator_model() {
        let config = FileBackendConfig {
            model: "llama3".to_string(),
            moderator_model: Some("gpt-4.1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.evaluator_model(), Model::Custom("llama3".to_string()));
        assert_eq!(config.moderator_model(), Model::Gpt41);
    }

    #[test]
    fn test_validate_reports_bad_values() {
        let config = FileBackendConfig {
            model: " ".to_string(),
            timeout_secs: 0,
            temperature: 3.5,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }
}
