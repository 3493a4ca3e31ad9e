//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`AnalysisParams`]: defaults and switches for one analysis run
//! - [`CallPolicy`]: timeout and retry bounds for backend calls

pub mod analysis_params;
pub mod call_policy;

pub use analysis_params::{AnalysisParams, DEFAULT_MAX_TAGS};
pub use call_policy::CallPolicy;
