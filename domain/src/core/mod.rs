//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - backend model used by delegated evaluators
//! - [`error::DomainError`] - caller contract violations
//! - [`string::preview`] - character-safe text previews

pub mod error;
pub mod model;
pub mod string;
