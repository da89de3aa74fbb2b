//! Backend abstraction for hosted model providers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::Result;

use super::backends::{GeminiBackend, OpenAiBackend};
use super::Provider;

/// A single prompt sent to a provider
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Provider-side model name (without the `provider/` prefix)
    pub model: String,
    /// System instruction framing the persona
    pub system: String,
    /// User prompt carrying the task
    pub prompt: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens
    pub max_output_tokens: Option<u32>,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens generated
    pub completion_tokens: u32,
    /// Total billed tokens
    pub total_tokens: u32,
}

/// Text returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// Create a completion with no usage information
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }
}

/// Trait for model provider backends
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &'static str;

    /// Send one prompt and wait for the full response
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;
}

/// Build the HTTP backend for a provider
pub fn backend_for(
    provider: Provider,
    api_key: impl Into<String>,
    base_url: Option<Url>,
    timeout: Duration,
) -> Result<Arc<dyn ModelBackend>> {
    let backend: Arc<dyn ModelBackend> = match provider {
        Provider::Gemini => {
            let mut backend = GeminiBackend::new(api_key).with_timeout(timeout)?;
            if let Some(url) = base_url {
                backend = backend.with_base_url(url);
            }
            Arc::new(backend)
        }
        Provider::OpenAi => {
            let mut backend = OpenAiBackend::new(api_key).with_timeout(timeout)?;
            if let Some(url) = base_url {
                backend = backend.with_base_url(url);
            }
            Arc::new(backend)
        }
    };

    Ok(backend)
}

/// Make sure `url` is treated as a directory by `Url::join`
pub(crate) fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_for_gemini() {
        let backend = backend_for(Provider::Gemini, "key", None, Duration::from_secs(5)).unwrap();
        assert_eq!(backend.name(), "gemini");
    }

    #[test]
    fn test_backend_for_openai() {
        let backend = backend_for(Provider::OpenAi, "key", None, Duration::from_secs(5)).unwrap();
        assert_eq!(backend.name(), "openai");
    }

    #[test]
    fn test_trailing_slash_added() {
        let url = Url::parse("http://localhost:9000/proxy").unwrap();
        assert_eq!(with_trailing_slash(url).as_str(), "http://localhost:9000/proxy/");

        let url = Url::parse("http://localhost:9000/").unwrap();
        assert_eq!(with_trailing_slash(url).as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_completion_text() {
        let completion = Completion::text("looks fine");
        assert_eq!(completion.text, "looks fine");
        assert!(completion.usage.is_none());
    }
}
