//! Evaluation value objects - per-evaluator results for one analysis run.
//!
//! - [`EvaluatorScore`] - one evaluator's verdict on one tag
//! - [`EvaluatorOutput`] - everything one evaluator produced, including the raw reply
//! - [`DegradedReason`] - why an evaluator's output carries no usable scores

use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment text used when an evaluator could not produce a result
pub const FAILURE_ASSESSMENT: &str = "analysis failed";

/// Assessment text used when a reply could not be parsed even after repair
pub const PARSE_FAILED_ASSESSMENT: &str = "parse failed";

/// Score given by one evaluator to one tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorScore {
    pub tag_id: String,
    /// Nominally 0-10; not enforced
    pub score: f64,
    pub rationale: String,
    /// Evaluator-specific perspective on the tag
    pub insight: String,
}

impl EvaluatorScore {
    pub fn new(tag_id: impl Into<String>, score: f64) -> Self {
        Self {
            tag_id: tag_id.into(),
            score,
            rationale: String::new(),
            insight: String::new(),
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.insight = insight.into();
        self
    }
}

/// Why an evaluator output is degraded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DegradedReason {
    /// The backend call failed
    Backend(String),
    /// The backend did not answer within the configured bound
    Timeout,
    /// The reply could not be parsed, even after repair
    MalformedPayload(String),
    /// The evaluator task itself crashed
    Crashed(String),
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradedReason::Backend(e) => write!(f, "backend error: {}", e),
            DegradedReason::Timeout => write!(f, "backend timed out"),
            DegradedReason::MalformedPayload(e) => write!(f, "malformed payload: {}", e),
            DegradedReason::Crashed(e) => write!(f, "evaluator crashed: {}", e),
        }
    }
}

/// Everything one evaluator produced during a run.
///
/// Kept unmodified after reconciliation so the discussion trail can show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorOutput {
    /// Evaluator identity (e.g. "analyst")
    pub evaluator: String,
    pub scores: Vec<EvaluatorScore>,
    pub overall_assessment: String,
    /// Unparsed reply text, or a short description for local evaluators
    pub raw_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded: Option<DegradedReason>,
}

impl EvaluatorOutput {
    pub fn new(
        evaluator: impl Into<String>,
        scores: Vec<EvaluatorScore>,
        overall_assessment: impl Into<String>,
        raw_response: impl Into<String>,
    ) -> Self {
        Self {
            evaluator: evaluator.into(),
            scores,
            overall_assessment: overall_assessment.into(),
            raw_response: raw_response.into(),
            degraded: None,
        }
    }

    /// Output for an evaluator that failed before producing anything usable.
    ///
    /// The analysis is empty and the assessment is the failure marker.
    pub fn degraded(evaluator: impl Into<String>, reason: DegradedReason) -> Self {
        let raw_response = format!("{}: {}", FAILURE_ASSESSMENT, reason);
        Self {
            evaluator: evaluator.into(),
            scores: Vec::new(),
            overall_assessment: FAILURE_ASSESSMENT.to_string(),
            raw_response,
            degraded: Some(reason),
        }
    }

    /// Mark this output as degraded while keeping whatever it already holds
    pub fn with_degraded(mut self, reason: DegradedReason) -> Self {
        self.degraded = Some(reason);
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Find this evaluator's score for a tag
    pub fn score_for(&self, tag_id: &str) -> Option<&EvaluatorScore> {
        self.scores.iter().find(|s| s.tag_id == tag_id)
    }
}
