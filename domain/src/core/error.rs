//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These cover caller contract violations only. Evaluator failures and
/// missing consensus are recovered inside the engine and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Subject profile has no tags")]
    EmptyProfile,

    #[error("Duplicate tag id in subject profile: {0}")]
    DuplicateTagId(String),

    #[error("Tag {tag_id} has a non-finite relevance score")]
    InvalidRelevance { tag_id: String },

    #[error("max_tags must be a positive integer (got {0})")]
    InvalidMaxTags(usize),

    #[error("Invalid engine mode: {0}")]
    InvalidMode(String),
}

impl DomainError {
    /// Check if this error was caused by the shape of the submitted profile
    pub fn is_profile_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyProfile
                | DomainError::DuplicateTagId(_)
                | DomainError::InvalidRelevance { .. }
        )
    }
}
