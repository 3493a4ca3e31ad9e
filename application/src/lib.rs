//! Application layer for tag-quorum
//!
//! This crate contains use cases, evaluators, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod evaluators;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AnalysisParams, CallPolicy};
pub use evaluators::{
    ConsensusModerator, DelegatedEvaluator, Evaluator, HeuristicEvaluator, LlmModerator,
};
pub use ports::{
    analysis_logger::{AnalysisEvent, AnalysisLogger, NoAnalysisLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{AnalysisPhase, NoProgress, ProgressNotifier},
};
pub use use_cases::analyze_tags::{AnalyzeTagsError, AnalyzeTagsInput, AnalyzeTagsUseCase};
