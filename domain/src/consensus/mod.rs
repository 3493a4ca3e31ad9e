//! Consensus domain
//!
//! Turns independent evaluator outputs into one ranked list of tags.
//!
//! # Algorithm
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Evaluator outputs (analyst, psychologist, strategist, ...)     │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 ▼
//!   per tag: collect scores (omitted ≠ zero)
//!   score     = mean(scores)
//!   agreement = clamp(1 - (max - min) / 10, 0, 1)
//!                                 ▼
//!   stable sort by score desc (input order on ties), take max_tags
//!                                 ▼
//!   nothing scored? ──► fallback: caller relevance desc, agreement 0.5
//! ```
//!
//! An optional moderator can replace the numeric ranking with its own
//! selection; see [`moderation`].

pub mod entry;
pub mod moderation;
pub mod reconciler;

pub use entry::{
    ConsensusEntry, ConsensusRanking, ConsensusSource, NEUTRAL_AGREEMENT, SCORE_SCALE, agreement,
    mean,
};
pub use moderation::ranking_from_moderator;
pub use reconciler::{ConsensusReconciler, FALLBACK_RATIONALE};
