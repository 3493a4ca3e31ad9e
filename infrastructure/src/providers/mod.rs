//! Text-generation backend adapters.
//!
//! Each adapter implements the [`LlmGateway`](tag_quorum_application::LlmGateway)
//! port. The OpenAI-compatible adapter is compiled with the `openai` feature.

#[cfg(feature = "openai")]
pub mod openai;
