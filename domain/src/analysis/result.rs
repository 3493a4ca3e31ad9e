//! Analysis result value objects - what a caller gets back from one run.
//!
//! - [`DiscussionEntry`] - bounded preview of one evaluator's output
//! - [`AnalysisResult`] - ranked tags, summary and discussion trail

use crate::consensus::{ConsensusEntry, ConsensusSource};
use crate::orchestration::EngineMode;
use serde::{Deserialize, Serialize};

/// One evaluator's contribution, as shown in the discussion trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionEntry {
    pub evaluator: String,
    /// Raw response cut to the preview length
    pub preview: String,
    pub overall_assessment: String,
    /// Number of tags the evaluator scored
    pub scored_tags: usize,
    /// Failure description if the evaluator degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
}

/// Complete result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub subject_id: String,
    pub selected_tags: Vec<ConsensusEntry>,
    pub summary: String,
    pub discussions: Vec<DiscussionEntry>,
    pub mode: EngineMode,
    pub source: ConsensusSource,
    /// True when the caller's relevance order was used instead of consensus
    pub fallback: bool,
}

impl AnalysisResult {
    /// Tag ids in ranked order
    pub fn tag_ids(&self) -> Vec<&str> {
        self.selected_tags.iter().map(|e| e.tag_id.as_str()).collect()
    }

    /// Evaluators whose output degraded
    pub fn degraded_evaluators(&self) -> impl Iterator<Item = &DiscussionEntry> {
        self.discussions.iter().filter(|d| d.degraded.is_some())
    }
}
