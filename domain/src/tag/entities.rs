//! Tag records and the subject profile that owns them.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category assigned to tags created from plain strings
pub const GENERIC_CATEGORY: &str = "generic";

/// Relevance prior assigned to tags created from plain strings
pub const DEFAULT_RELEVANCE: f64 = 8.0;

/// A single descriptive tag attached to a subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    /// Identifier, unique within one subject's tag set
    pub tag_id: String,
    /// Display name
    #[serde(alias = "tag_name")]
    pub name: String,
    /// Free-text classification (e.g. "behavior", "preference")
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Caller-supplied prior, typically 0-10
    #[serde(default)]
    pub relevance_score: f64,
}

impl TagRecord {
    pub fn new(
        tag_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        relevance_score: f64,
    ) -> Self {
        Self {
            tag_id: tag_id.into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            relevance_score,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The subject whose tags are being ranked.
///
/// Tag order is significant: it is the tie-breaker for equal consensus
/// scores and for the fallback ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectProfile {
    #[serde(alias = "user_id")]
    pub subject_id: String,
    pub name: String,
    pub tags: Vec<TagRecord>,
    /// Free-text background handed to evaluators as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl SubjectProfile {
    pub fn new(subject_id: impl Into<String>, name: impl Into<String>, tags: Vec<TagRecord>) -> Self {
        Self {
            subject_id: subject_id.into(),
            name: name.into(),
            tags,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Build a profile from bare tag names.
    ///
    /// Ids are assigned sequentially as `tag_001`, `tag_002`, ... in input
    /// order; every tag gets the generic category and the default relevance.
    pub fn from_plain_tags<S: AsRef<str>>(names: &[S], subject_id: impl Into<String>) -> Self {
        let subject_id = subject_id.into();
        let tags = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.as_ref();
                TagRecord::new(
                    format!("tag_{:03}", i + 1),
                    name,
                    GENERIC_CATEGORY,
                    DEFAULT_RELEVANCE,
                )
                .with_description(format!("User tag: {}", name))
            })
            .collect();

        Self {
            name: format!("User {}", subject_id),
            subject_id,
            tags,
            context: Some("Profile generated from a plain tag list".to_string()),
        }
    }

    /// Look up a tag by id
    pub fn tag(&self, tag_id: &str) -> Option<&TagRecord> {
        self.tags.iter().find(|t| t.tag_id == tag_id)
    }

    /// Position of a tag in input order
    pub fn position(&self, tag_id: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.tag_id == tag_id)
    }

    /// Check the caller contract: at least one tag, unique ids, finite priors.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tags.is_empty() {
            return Err(DomainError::EmptyProfile);
        }

        let mut seen = HashSet::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !seen.insert(tag.tag_id.as_str()) {
                return Err(DomainError::DuplicateTagId(tag.tag_id.clone()));
            }
            if !tag.relevance_score.is_finite() {
                return Err(DomainError::InvalidRelevance {
                    tag_id: tag.tag_id.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Convenience wrapper around [`SubjectProfile::from_plain_tags`].
pub fn profile_from_plain_tags<S: AsRef<str>>(
    names: &[S],
    subject_id: impl Into<String>,
) -> SubjectProfile {
    SubjectProfile::from_plain_tags(names, subject_id)
}
