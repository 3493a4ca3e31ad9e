//! Turn a moderator's selection into a ranking.

use super::entry::{ConsensusEntry, ConsensusRanking, ConsensusSource, NEUTRAL_AGREEMENT};
use crate::evaluation::ModeratorPayload;
use crate::tag::SubjectProfile;
use std::collections::HashSet;

/// Build a ranking from a moderator payload.
///
/// Selections naming unknown tags, or repeating one, are dropped. Missing
/// agreement defaults to neutral; given values are clamped to `[0, 1]`.
/// Returns `None` when nothing usable is left so the caller can keep the
/// numeric reconciliation instead.
pub fn ranking_from_moderator(
    payload: ModeratorPayload,
    profile: &SubjectProfile,
    max_tags: usize,
) -> Option<ConsensusRanking> {
    let mut seen = HashSet::new();
    let mut entries: Vec<ConsensusEntry> = payload
        .selected_tags
        .into_iter()
        .filter_map(|selection| {
            let tag = profile.tag(&selection.tag_id)?;
            if !seen.insert(tag.tag_id.clone()) {
                return None;
            }
            Some(ConsensusEntry {
                tag_id: tag.tag_id.clone(),
                name: tag.name.clone(),
                score: selection.score,
                rationale: selection.reasoning,
                agreement: selection
                    .consensus
                    .map(|c| c.clamp(0.0, 1.0))
                    .unwrap_or(NEUTRAL_AGREEMENT),
                evaluator_count: 0,
            })
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(max_tags);

    Some(ConsensusRanking {
        entries,
        summary: payload.discussion_summary,
        source: ConsensusSource::Moderator,
    })
}
