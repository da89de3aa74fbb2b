//! Model client module for talking to hosted LLM providers

mod backend;
mod backends;
mod model;
#[cfg(test)]
pub(crate) mod testing;

pub use backend::{backend_for, Completion, CompletionRequest, ModelBackend, TokenUsage};
pub use backends::{GeminiBackend, OpenAiBackend, GEMINI_BASE_URL, OPENAI_BASE_URL};
pub use model::{Llm, ModelId, Provider};
