//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_tags;
pub(crate) mod shared;
