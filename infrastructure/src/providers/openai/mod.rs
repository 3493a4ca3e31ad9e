//! OpenAI-compatible chat completions backend (feature `openai`).

mod gateway;
mod session;
pub mod types;

pub use gateway::{OpenAiGateway, OpenAiSettings};
pub use session::OpenAiSession;
