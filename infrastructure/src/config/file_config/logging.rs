//! Trace logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// trace_file = "~/.local/share/tag-quorum/trace.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving evaluator outputs and the final ranking
    pub trace_file: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Trace path with a leading `~/` expanded to the home directory
    pub fn resolved_trace_file(&self) -> Option<PathBuf> {
        let path = self.trace_file.as_ref()?;
        match path.strip_prefix("~") {
            Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
            Err(_) => Some(path.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_is_kept() {
        let config = FileLoggingConfig {
            trace_file: Some(PathBuf::from("/tmp/trace.jsonl")),
        };
        assert_eq!(
            config.resolved_trace_file(),
            Some(PathBuf::from("/tmp/trace.jsonl"))
        );
    }

    #[test]
    fn test_home_prefix_is_expanded() {
        let config = FileLoggingConfig {
            trace_file: Some(PathBuf::from("~/trace.jsonl")),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.resolved_trace_file(), Some(home.join("trace.jsonl")));
        }
    }

    #[test]
    fn test_unset() {
        assert!(FileLoggingConfig::default().resolved_trace_file().is_none());
    }
}
