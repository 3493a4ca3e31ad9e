//! Prompt templates for delegated evaluators and the moderator.

mod template;

pub use template::{MODERATOR_EXCERPT_CHARS, PromptTemplate};
