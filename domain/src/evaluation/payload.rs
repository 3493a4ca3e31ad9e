//! Typed payloads requested from the delegated backend.
//!
//! Items are decoded leniently: one malformed entry is skipped instead of
//! failing the whole payload, and scores may arrive as numbers or numeric
//! strings.

use super::value_objects::{EvaluatorScore, PARSE_FAILED_ASSESSMENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload an evaluator is asked to return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnalysisPayload")]
pub struct AnalysisPayload {
    pub analysis: Vec<EvaluatorScore>,
    pub overall_assessment: String,
}

impl AnalysisPayload {
    /// Canonical payload substituted when a reply cannot be parsed
    pub fn parse_failed() -> Self {
        Self {
            analysis: Vec::new(),
            overall_assessment: PARSE_FAILED_ASSESSMENT.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawAnalysisPayload {
    #[serde(default)]
    analysis: Vec<Value>,
    #[serde(default)]
    overall_assessment: Option<Value>,
}

#[derive(Deserialize)]
struct RawScore {
    tag_id: Value,
    score: Value,
    #[serde(default, alias = "rationale")]
    reasoning: Option<Value>,
    #[serde(default, alias = "insight")]
    professional_insight: Option<Value>,
}

impl From<RawAnalysisPayload> for AnalysisPayload {
    fn from(raw: RawAnalysisPayload) -> Self {
        let analysis = raw
            .analysis
            .into_iter()
            .filter_map(|item| serde_json::from_value::<RawScore>(item).ok())
            .filter_map(|item| {
                let tag_id = value_as_text(&item.tag_id)?;
                let score = value_as_number(&item.score)?;
                Some(
                    EvaluatorScore::new(tag_id, score)
                        .with_rationale(
                            item.reasoning
                                .as_ref()
                                .and_then(value_as_text)
                                .unwrap_or_default(),
                        )
                        .with_insight(
                            item.professional_insight
                                .as_ref()
                                .and_then(value_as_text)
                                .unwrap_or_default(),
                        ),
                )
            })
            .collect();

        Self {
            analysis,
            overall_assessment: raw
                .overall_assessment
                .as_ref()
                .and_then(value_as_text)
                .unwrap_or_default(),
        }
    }
}

/// One selection returned by a moderator session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeratedSelection {
    pub tag_id: String,
    pub score: f64,
    pub reasoning: String,
    /// Moderator's view of evaluator agreement, if given
    pub consensus: Option<f64>,
}

/// Payload a moderator is asked to return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawModeratorPayload")]
pub struct ModeratorPayload {
    pub selected_tags: Vec<ModeratedSelection>,
    pub discussion_summary: Option<String>,
}

#[derive(Deserialize)]
struct RawModeratorPayload {
    #[serde(default)]
    selected_tags: Vec<Value>,
    #[serde(default)]
    discussion_summary: Option<Value>,
}

#[derive(Deserialize)]
struct RawSelection {
    tag_id: Value,
    score: Value,
    #[serde(default)]
    reasoning: Option<Value>,
    #[serde(default, alias = "agreement")]
    consensus: Option<Value>,
}

impl From<RawModeratorPayload> for ModeratorPayload {
    fn from(raw: RawModeratorPayload) -> Self {
        let selected_tags = raw
            .selected_tags
            .into_iter()
            .filter_map(|item| serde_json::from_value::<RawSelection>(item).ok())
            .filter_map(|item| {
                Some(ModeratedSelection {
                    tag_id: value_as_text(&item.tag_id)?,
                    score: value_as_number(&item.score)?,
                    reasoning: item
                        .reasoning
                        .as_ref()
                        .and_then(value_as_text)
                        .unwrap_or_default(),
                    consensus: item.consensus.as_ref().and_then(value_as_number),
                })
            })
            .collect();

        Self {
            selected_tags,
            discussion_summary: raw
                .discussion_summary
                .as_ref()
                .and_then(value_as_text)
                .filter(|s| !s.trim().is_empty()),
        }
    }
}

fn value_as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
