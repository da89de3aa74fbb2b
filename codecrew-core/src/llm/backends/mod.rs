//! Provider backend implementations

mod gemini;
mod openai;

pub use gemini::{GeminiBackend, GEMINI_BASE_URL};
pub use openai::{OpenAiBackend, OPENAI_BASE_URL};
