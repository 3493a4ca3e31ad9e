//! Engine mode definitions.
//!
//! [`EngineMode`] decides which evaluator set a process runs with:
//! - Heuristic: local role-flavored scoring, no external calls
//! - Delegated: every evaluator asks the text-generation backend
//!
//! The mode is resolved once at startup. A process that asked for Delegated
//! but could not reach a backend runs Heuristic for its whole lifetime.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Local scoring with jitter (default)
    #[default]
    Heuristic,
    /// Scoring delegated to an external text-generation backend
    Delegated,
}

impl EngineMode {
    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            EngineMode::Heuristic => "Heuristic: local role-based scoring",
            EngineMode::Delegated => "Delegated: scoring by an external language model",
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, EngineMode::Delegated)
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMode::Heuristic => write!(f, "heuristic"),
            EngineMode::Delegated => write!(f, "delegated"),
        }
    }
}

impl std::str::FromStr for EngineMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "simulation" | "local" => Ok(EngineMode::Heuristic),
            "delegated" | "llm" | "remote" => Ok(EngineMode::Delegated),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_heuristic() {
        assert_eq!(EngineMode::default(), EngineMode::Heuristic);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("Simulation".parse::<EngineMode>().unwrap(), EngineMode::Heuristic);
        assert_eq!("llm".parse::<EngineMode>().unwrap(), EngineMode::Delegated);
        assert!("turbo".parse::<EngineMode>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for mode in [EngineMode::Heuristic, EngineMode::Delegated] {
            assert_eq!(mode.to_string().parse::<EngineMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EngineMode::Delegated).unwrap();
        assert_eq!(json, "\"delegated\"");
    }
}
