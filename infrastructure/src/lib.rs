//! Infrastructure layer for tag-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, configuration file loading, and the
//! bootstrap that assembles a ready-to-run analysis engine.

pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use bootstrap::{EngineBootstrap, EngineSetup};
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileEngineConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileRoleConfig,
};
pub use logging::JsonlAnalysisLogger;
#[cfg(feature = "openai")]
pub use providers::openai::{OpenAiGateway, OpenAiSession, OpenAiSettings};
