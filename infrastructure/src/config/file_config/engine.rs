//! Engine configuration from TOML (`[engine]` section)

use serde::{Deserialize, Serialize};
use tag_quorum_domain::analysis::DEFAULT_PREVIEW_CHARS;
use tag_quorum_domain::{ConfigIssue, ConfigIssueCode, EngineMode};

/// Raw engine configuration from TOML
///
/// # Example
///
/// ```toml
/// [engine]
/// mode = "delegated"            # "heuristic" (default) or "delegated"
/// max_tags = 5
/// preview_len = 200
/// moderated_consensus = true    # delegated mode only
/// seed = 42                     # reproducible heuristic jitter
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Requested engine mode
    pub mode: String,
    /// Tags returned when the caller gives no count
    pub max_tags: usize,
    /// Characters of each evaluator reply kept in the discussion trail
    pub preview_len: usize,
    /// Let a moderator session pick the final ranking
    pub moderated_consensus: bool,
    /// Seed for heuristic jitter
    pub seed: Option<u64>,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            mode: EngineMode::default().to_string(),
            max_tags: 10,
            preview_len: DEFAULT_PREVIEW_CHARS,
            moderated_consensus: false,
            seed: None,
        }
    }
}

impl FileEngineConfig {
    /// Parse the requested mode, falling back to heuristic on unknown values
    pub fn parse_mode(&self) -> (EngineMode, Vec<ConfigIssue>) {
        match self.mode.parse::<EngineMode>() {
            Ok(mode) => (mode, Vec::new()),
            Err(_) => (
                EngineMode::Heuristic,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "engine.mode".to_string(),
                        value: self.mode.clone(),
                        valid_values: vec!["heuristic".to_string(), "delegated".to_string()],
                    },
                    format!(
                        "engine.mode: unknown value '{}', falling back to 'heuristic'",
                        self.mode
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (mode, mut issues) = self.parse_mode();

        if self.max_tags == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "engine.max_tags".to_string(),
                },
                "engine.max_tags must be at least 1",
            ));
        }

        if self.preview_len == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "engine.preview_len".to_string(),
                },
                "engine.preview_len is 0, discussion previews will be empty",
            ));
        }

        if self.moderated_consensus && !mode.is_delegated() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::IneffectiveSetting {
                    field: "engine.moderated_consensus".to_string(),
                },
                "engine.moderated_consensus only applies in delegated mode",
            ));
        }

        issues
    }
}
