//! Orchestration domain: how a process runs its evaluators.

pub mod mode;

pub use mode::EngineMode;
