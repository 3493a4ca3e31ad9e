//! Consensus entry types
//!
//! This module defines the reconciled view of one tag and of a whole run.

use serde::{Deserialize, Serialize};

/// Agreement assigned to entries that did not come from evaluator consensus
pub const NEUTRAL_AGREEMENT: f64 = 0.5;

/// Width of the nominal score scale used by the agreement metric
pub const SCORE_SCALE: f64 = 10.0;

/// Agreement between a set of scores for one tag.
///
/// `1 - (max - min) / 10`, clamped to `[0, 1]`. Identical scores give 1.0;
/// an empty set gives 0.0.
pub fn agreement(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    (1.0 - (max - min) / SCORE_SCALE).clamp(0.0, 1.0)
}

/// Arithmetic mean; 0.0 for an empty set
pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Where a ranking came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusSource {
    /// Numeric aggregation of evaluator scores
    Evaluators,
    /// Selection made by a moderator session
    Moderator,
    /// Caller-supplied relevance order, used when nothing else was usable
    Fallback,
}

impl ConsensusSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ConsensusSource::Fallback)
    }
}

impl std::fmt::Display for ConsensusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusSource::Evaluators => write!(f, "evaluators"),
            ConsensusSource::Moderator => write!(f, "moderator"),
            ConsensusSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Reconciled view of one tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    pub tag_id: String,
    pub name: String,
    /// Aggregated score
    pub score: f64,
    pub rationale: String,
    /// 1.0 = every evaluator gave the same score
    pub agreement: f64,
    /// How many evaluators scored this tag (0 for fallback entries)
    #[serde(default)]
    pub evaluator_count: usize,
}

/// Ranked, truncated result of reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRanking {
    pub entries: Vec<ConsensusEntry>,
    /// Summary produced alongside the ranking, if any
    pub summary: Option<String>,
    pub source: ConsensusSource,
}

impl ConsensusRanking {
    pub fn is_fallback(&self) -> bool {
        self.source.is_fallback()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreement_identical_scores() {
        assert_eq!(agreement(&[7.0, 7.0, 7.0]), 1.0);
        assert_eq!(agreement(&[4.2]), 1.0);
    }

    #[test]
    fn test_agreement_spread() {
        assert!((agreement(&[8.0, 8.0, 4.0]) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_agreement_clamped_outside_scale() {
        assert_eq!(agreement(&[-3.0, 12.0]), 0.0);
    }

    #[test]
    fn test_agreement_empty() {
        assert_eq!(agreement(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert!((mean(&[8.0, 8.0, 4.0]) - 6.6667).abs() < 0.01);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(ConsensusSource::Evaluators.to_string(), "evaluators");
        assert_eq!(ConsensusSource::Fallback.to_string(), "fallback");
        assert!(ConsensusSource::Fallback.is_fallback());
        assert!(!ConsensusSource::Moderator.is_fallback());
    }
}
