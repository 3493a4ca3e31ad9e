//! Evaluators: independent scorers of a subject's tags.
//!
//! Every evaluator sees the whole profile and returns exactly one
//! [`EvaluatorOutput`]. Failures never escape as errors; they come back as
//! degraded outputs so one evaluator cannot block or alter another.
//!
//! - [`HeuristicEvaluator`] - local role-flavored scoring with jitter
//! - [`DelegatedEvaluator`] - scoring by an external text-generation backend
//! - [`LlmModerator`] - optional moderator that picks the final ranking

pub mod delegated;
pub mod heuristic;
pub mod moderator;

pub use delegated::DelegatedEvaluator;
pub use heuristic::HeuristicEvaluator;
pub use moderator::{ConsensusModerator, LlmModerator};

use async_trait::async_trait;
use tag_quorum_domain::{EvaluatorOutput, SubjectProfile};

/// One independent perspective on a subject's tags
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Identity used in outputs and the discussion trail (e.g. "analyst")
    fn id(&self) -> &str;

    /// Score every tag of `profile`; never fails
    async fn score(&self, profile: &SubjectProfile) -> EvaluatorOutput;
}
