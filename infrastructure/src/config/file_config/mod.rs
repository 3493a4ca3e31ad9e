//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod engine;
mod logging;
mod output;
mod roles;

pub use backend::FileBackendConfig;
pub use engine::FileEngineConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use roles::FileRoleConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tag_quorum_domain::{ConfigIssue, ConfigIssueCode, HeuristicProfile};
use thiserror::Error;

/// Raised when a configuration carries at least one error-level issue
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Engine mode and analysis defaults
    pub engine: FileEngineConfig,
    /// Text-generation backend for delegated mode
    pub backend: FileBackendConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Trace logging
    pub logging: FileLoggingConfig,
    /// Evaluator roles; the three built-in ones when empty
    pub roles: Vec<FileRoleConfig>,
}

impl FileConfig {
    /// Heuristic profiles for the configured roles, in configuration order
    pub fn heuristic_profiles(&self) -> Vec<HeuristicProfile> {
        if self.roles.is_empty() {
            HeuristicProfile::builtin()
        } else {
            self.roles.iter().map(FileRoleConfig::to_profile).collect()
        }
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Engine values (mode, max_tags, preview_len, moderation)
    /// 2. Backend values (empty names, timeout, temperature)
    /// 3. Role overrides (empty or duplicate names, bad multipliers)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.engine.validate());
        issues.extend(self.backend.validate());

        let mut seen = HashSet::new();
        for (index, role) in self.roles.iter().enumerate() {
            issues.extend(role.validate(index));
            let name = role.role.trim().to_lowercase();
            if !name.is_empty() && !seen.insert(name.clone()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateRole { role: name.clone() },
                    format!("roles: '{}' is configured more than once", name),
                ));
            }
        }

        issues
    }

    /// Fail if any issue is an error; warnings are returned for logging
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(
                errors.into_iter().map(|e| e.message).collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tag_quorum_domain::{EngineMode, Model, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[engine]
mode = "delegated"
max_tags = 5
preview_len = 120
moderated_consensus = true
seed = 7

[backend]
base_url = "http://localhost:8080/v1"
model = "gpt-4.1-mini"
temperature = 0.2
timeout_secs = 30

[output]
format = "json"
color = false

[logging]
trace_file = "/tmp/tag-quorum.jsonl"

[[roles]]
role = "analyst"
boost_multiplier = 1.4

[[roles]]
role = "curator"
boost_categories = ["hobby"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.parse_mode().0, EngineMode::Delegated);
        assert_eq!(config.engine.max_tags, 5);
        assert_eq!(config.engine.seed, Some(7));
        assert_eq!(config.backend.evaluator_model(), Model::Gpt41Mini);
        assert_eq!(config.backend.max_retries, 1);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.logging.trace_file.is_some());

        let profiles = config.heuristic_profiles();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].boost_multiplier, 1.4);
        assert_eq!(profiles[1].role, "curator");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[engine]
max_tags = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.max_tags, 3);
        // Defaults should apply
        assert_eq!(config.engine.mode, "heuristic");
        assert_eq!(config.engine.preview_len, 200);
        assert_eq!(config.backend.api_key_env, "OPENAI_API_KEY");
        assert!(config.output.color);
        assert_eq!(config.heuristic_profiles().len(), 3);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.ensure_valid().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_roles_are_errors() {
        let toml_str = r#"
[[roles]]
role = "analyst"

[[roles]]
role = "Analyst"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let err = config.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("'analyst' is configured more than once"));
    }

    #[test]
    fn test_infinite_jitter_is_rejected() {
        let toml_str = r#"
[[roles]]
role = "analyst"
default_jitter = [0.0, inf]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let err = config.ensure_valid().unwrap_err();
        assert!(err.to_string().contains("roles[0].default_jitter"));
    }

    #[test]
    fn test_ensure_valid_returns_warnings() {
        let mut config = FileConfig::default();
        config.engine.mode = "sideways".to_string();
        let warnings = config.ensure_valid().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_zero_max_tags_is_error() {
        let mut config = FileConfig::default();
        config.engine.max_tags = 0;
        assert!(config.ensure_valid().is_err());
    }
}
