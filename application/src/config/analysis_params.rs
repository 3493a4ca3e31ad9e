//! Analysis parameters: use case control.
//!
//! [`AnalysisParams`] groups the static parameters that control one
//! [`AnalyzeTagsUseCase`](crate::use_cases::analyze_tags::AnalyzeTagsUseCase)
//! run. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use tag_quorum_domain::Model;
use tag_quorum_domain::analysis::DEFAULT_PREVIEW_CHARS;

/// Default number of tags returned when the caller does not ask for a count
pub const DEFAULT_MAX_TAGS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Tags returned when the input does not set `max_tags`.
    pub default_max_tags: usize,
    /// Characters of each raw evaluator reply kept in the discussion trail.
    pub preview_chars: usize,
    /// Let a moderator session pick the final ranking (delegated mode only).
    pub moderated_consensus: bool,
    /// Model the moderator session runs on.
    pub moderator_model: Model,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            default_max_tags: DEFAULT_MAX_TAGS,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            moderated_consensus: false,
            moderator_model: Model::default(),
        }
    }
}

impl AnalysisParams {
    // ==================== Builder Methods ====================

    pub fn with_default_max_tags(mut self, max: usize) -> Self {
        self.default_max_tags = max;
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn with_moderated_consensus(mut self, enabled: bool) -> Self {
        self.moderated_consensus = enabled;
        self
    }

    pub fn with_moderator_model(mut self, model: Model) -> Self {
        self.moderator_model = model;
        self
    }
}
