//! Consensus reconciliation across evaluators.

use super::entry::{
    ConsensusEntry, ConsensusRanking, ConsensusSource, NEUTRAL_AGREEMENT, agreement, mean,
};
use crate::evaluation::EvaluatorOutput;
use crate::tag::SubjectProfile;
use std::collections::{HashMap, HashSet};

/// Rationale attached to every fallback entry
pub const FALLBACK_RATIONALE: &str = "Ranked by the original relevance score";

/// Reconciles independent evaluator outputs into one ranking.
///
/// # Example
///
/// ```
/// use tag_quorum_domain::consensus::ConsensusReconciler;
/// use tag_quorum_domain::evaluation::{EvaluatorOutput, EvaluatorScore};
/// use tag_quorum_domain::tag::profile_from_plain_tags;
///
/// let profile = profile_from_plain_tags(&["coffee"], "u1");
/// let outputs: Vec<EvaluatorOutput> = [8.0, 8.0, 4.0]
///     .iter()
///     .enumerate()
///     .map(|(i, s)| {
///         EvaluatorOutput::new(format!("e{}", i), vec![EvaluatorScore::new("tag_001", *s)], "", "")
///     })
///     .collect();
///
/// let ranking = ConsensusReconciler::reconcile(&outputs, &profile, 10);
/// assert!((ranking.entries[0].score - 6.67).abs() < 0.01);
/// assert!((ranking.entries[0].agreement - 0.6).abs() < 1e-9);
/// ```
pub struct ConsensusReconciler;

impl ConsensusReconciler {
    /// Aggregate, rank and truncate.
    ///
    /// Tags nobody scored are left out; scores for tag ids that are not in
    /// the profile are ignored. Only the first score an evaluator gives a tag
    /// counts. Falls back to [`Self::fallback_ranking`] when nothing remains.
    pub fn reconcile(
        outputs: &[EvaluatorOutput],
        profile: &SubjectProfile,
        max_tags: usize,
    ) -> ConsensusRanking {
        let known: HashSet<&str> = profile.tags.iter().map(|t| t.tag_id.as_str()).collect();
        let mut collected: HashMap<&str, Vec<f64>> = HashMap::new();
        let mut contributing = 0;

        for output in outputs {
            let mut seen = HashSet::new();
            let mut contributed = false;
            for score in &output.scores {
                let tag_id = score.tag_id.as_str();
                if !known.contains(tag_id) || !seen.insert(tag_id) {
                    continue;
                }
                collected.entry(tag_id).or_default().push(score.score);
                contributed = true;
            }
            if contributed {
                contributing += 1;
            }
        }

        // Built in input order so the stable sort below keeps it on ties.
        let mut entries: Vec<ConsensusEntry> = profile
            .tags
            .iter()
            .filter_map(|tag| {
                let scores = collected.get(tag.tag_id.as_str())?;
                let score = mean(scores);
                let agreement = agreement(scores);
                Some(ConsensusEntry {
                    tag_id: tag.tag_id.clone(),
                    name: tag.name.clone(),
                    score,
                    rationale: format!(
                        "Combined view of {} evaluators: mean score {:.1}, agreement {:.2}",
                        scores.len(),
                        score,
                        agreement
                    ),
                    agreement,
                    evaluator_count: scores.len(),
                })
            })
            .collect();

        if entries.is_empty() {
            return Self::fallback_ranking(profile, max_tags);
        }

        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        entries.truncate(max_tags);

        let summary = format!(
            "Evaluators agreed on {} of {} tags after reviewing {} perspectives",
            entries.len(),
            profile.tags.len(),
            contributing
        );

        ConsensusRanking {
            entries,
            summary: Some(summary),
            source: ConsensusSource::Evaluators,
        }
    }

    /// Rank the original tags by their caller-supplied relevance.
    ///
    /// Always succeeds for a non-empty profile. Entries get a neutral
    /// agreement and a fixed rationale.
    pub fn fallback_ranking(profile: &SubjectProfile, max_tags: usize) -> ConsensusRanking {
        let mut tags: Vec<_> = profile.tags.iter().collect();
        tags.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        let entries = tags
            .into_iter()
            .take(max_tags)
            .map(|tag| ConsensusEntry {
                tag_id: tag.tag_id.clone(),
                name: tag.name.clone(),
                score: tag.relevance_score,
                rationale: FALLBACK_RATIONALE.to_string(),
                agreement: NEUTRAL_AGREEMENT,
                evaluator_count: 0,
            })
            .collect();

        ConsensusRanking {
            entries,
            summary: None,
            source: ConsensusSource::Fallback,
        }
    }
}
