//! Evaluation domain
//!
//! An evaluator looks at every tag of a subject and returns one score per
//! tag plus an overall assessment. Two kinds exist:
//!
//! - **Heuristic**: local scoring driven by a [`HeuristicProfile`]
//!   (analyst, psychologist, strategist)
//! - **Delegated**: an external text-generation backend whose free-text
//!   reply is turned into an [`AnalysisPayload`] by [`parse_structured_reply`]
//!
//! ```text
//! reply ──► extract_payload ──► strict parse ──ok──► Parsed
//!                                   │
//!                                 fail ──► truncated? ──yes──► repair ──► re-parse ──► Parsed / Degraded
//!                                              │
//!                                              no ──► Degraded
//! ```

pub mod parsing;
pub mod payload;
pub mod profile;
pub mod value_objects;

pub use parsing::{
    PayloadOutcome, extract_payload, looks_truncated, parse_structured_reply,
    repair_truncated_json,
};
pub use payload::{AnalysisPayload, ModeratedSelection, ModeratorPayload};
pub use profile::{HeuristicProfile, JitterRange, MAX_SCORE};
pub use value_objects::{
    DegradedReason, EvaluatorOutput, EvaluatorScore, FAILURE_ASSESSMENT,
    PARSE_FAILED_ASSESSMENT,
};
