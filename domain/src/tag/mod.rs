//! Tag domain: the records being ranked and the subject that owns them.

pub mod entities;

pub use entities::{
    DEFAULT_RELEVANCE, GENERIC_CATEGORY, SubjectProfile, TagRecord, profile_from_plain_tags,
};
