//! Result assembly: ranking + evaluator outputs → [`AnalysisResult`].

use super::result::{AnalysisResult, DiscussionEntry};
use crate::consensus::ConsensusRanking;
use crate::core::string::preview;
use crate::evaluation::EvaluatorOutput;
use crate::orchestration::EngineMode;
use crate::tag::SubjectProfile;

/// Default length of the raw-response preview in the discussion trail
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

pub struct ResultAssembler {
    preview_chars: usize,
}

impl ResultAssembler {
    pub fn new(preview_chars: usize) -> Self {
        Self { preview_chars }
    }

    /// Build the caller-facing result.
    ///
    /// The ranking is copied up to `max_tags`. Its own summary wins;
    /// otherwise a count-based summary is generated.
    pub fn assemble(
        &self,
        profile: &SubjectProfile,
        ranking: ConsensusRanking,
        outputs: &[EvaluatorOutput],
        mode: EngineMode,
        max_tags: usize,
    ) -> AnalysisResult {
        let mut selected_tags = ranking.entries;
        selected_tags.truncate(max_tags);

        let summary = ranking
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Multi-evaluator analysis complete: {} of {} tags ranked from {} evaluator outputs",
                    selected_tags.len(),
                    profile.tags.len(),
                    outputs.len()
                )
            });

        let discussions = outputs
            .iter()
            .map(|output| DiscussionEntry {
                evaluator: output.evaluator.clone(),
                preview: preview(&output.raw_response, self.preview_chars),
                overall_assessment: output.overall_assessment.clone(),
                scored_tags: output.scores.len(),
                degraded: output.degraded.as_ref().map(|r| r.to_string()),
            })
            .collect();

        AnalysisResult {
            subject_id: profile.subject_id.clone(),
            selected_tags,
            summary,
            discussions,
            mode,
            source: ranking.source,
            fallback: ranking.source.is_fallback(),
        }
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::{ConsensusReconciler, ConsensusSource};
    use crate::evaluation::{DegradedReason, EvaluatorScore};
    use crate::tag::profile_from_plain_tags;

    #[test]
    fn test_assemble_uses_ranking_summary() {
        let profile = profile_from_plain_tags(&["a", "b"], "u1");
        let outputs = vec![EvaluatorOutput::new(
            "analyst",
            vec![EvaluatorScore::new("tag_002", 9.0), EvaluatorScore::new("tag_001", 3.0)],
            "ok",
            "x".repeat(500),
        )];
        let ranking = ConsensusReconciler::reconcile(&outputs, &profile, 10);

        let result = ResultAssembler::default().assemble(
            &profile,
            ranking,
            &outputs,
            EngineMode::Heuristic,
            10,
        );

        assert_eq!(result.subject_id, "u1");
        assert_eq!(result.tag_ids(), vec!["tag_002", "tag_001"]);
        assert!(result.summary.starts_with("Evaluators agreed on 2 of 2 tags"));
        assert!(!result.fallback);
        assert_eq!(result.source, ConsensusSource::Evaluators);
        assert_eq!(result.discussions[0].preview.chars().count(), 203);
        assert!(result.discussions[0].preview.ends_with("..."));
        assert_eq!(result.discussions[0].scored_tags, 2);
    }

    #[test]
    fn test_assemble_fallback_gets_default_summary() {
        let profile = profile_from_plain_tags(&["a", "b", "c"], "u1");
        let outputs = vec![EvaluatorOutput::degraded(
            "analyst",
            DegradedReason::Backend("refused".into()),
        )];
        let ranking = ConsensusReconciler::reconcile(&outputs, &profile, 2);

        let result = ResultAssembler::new(20).assemble(
            &profile,
            ranking,
            &outputs,
            EngineMode::Delegated,
            2,
        );

        assert!(result.fallback);
        assert_eq!(result.selected_tags.len(), 2);
        assert_eq!(
            result.summary,
            "Multi-evaluator analysis complete: 2 of 3 tags ranked from 1 evaluator outputs"
        );
        assert_eq!(result.degraded_evaluators().count(), 1);
        assert!(result.discussions[0].preview.chars().count() <= 23);
    }
}
