//! Domain layer for tag-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Evaluators
//!
//! Several independent evaluators (analyst, psychologist, strategist) each
//! score every tag of a [`SubjectProfile`]. An evaluator either scores locally
//! from a [`HeuristicProfile`] or delegates to a text-generation backend whose
//! reply is parsed into an [`AnalysisPayload`].
//!
//! ## Consensus
//!
//! The [`ConsensusReconciler`] merges the evaluator outputs into one ranking
//! (mean score, agreement from the score spread). When nothing usable was
//! scored, the caller's own relevance order is used instead.
//!
//! ## Engine Mode
//!
//! - **Heuristic** (default): local scoring, no external calls
//! - **Delegated**: every evaluator asks the backend

pub mod analysis;
pub mod config;
pub mod consensus;
pub mod core;
pub mod evaluation;
pub mod orchestration;
pub mod prompt;
pub mod tag;

// Re-export commonly used types
pub use analysis::{AnalysisResult, DiscussionEntry, ResultAssembler};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consensus::{
    ConsensusEntry, ConsensusRanking, ConsensusReconciler, ConsensusSource,
    ranking_from_moderator,
};
pub use core::{error::DomainError, model::Model, string::preview};
pub use evaluation::{
    AnalysisPayload, DegradedReason, EvaluatorOutput, EvaluatorScore, HeuristicProfile,
    JitterRange, ModeratorPayload, PayloadOutcome, parse_structured_reply,
};
pub use orchestration::EngineMode;
pub use prompt::PromptTemplate;
pub use tag::{SubjectProfile, TagRecord, profile_from_plain_tags};
