//! Analysis results and their assembly.

pub mod assembler;
pub mod result;

pub use assembler::{DEFAULT_PREVIEW_CHARS, ResultAssembler};
pub use result::{AnalysisResult, DiscussionEntry};
