//! OpenAI-compatible chat completions backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

use crate::llm::backend::{
    with_trailing_slash, Completion, CompletionRequest, ModelBackend, TokenUsage,
};
use crate::{Error, Result};

/// Public OpenAI API base URL
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";

/// Backend for any endpoint speaking the chat completions protocol
#[derive(Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl OpenAiBackend {
    /// Create a new backend against the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: Url::parse(OPENAI_BASE_URL).expect("OPENAI_BASE_URL is a valid URL"),
        }
    }

    /// Point the backend at a compatible endpoint (OpenRouter, vLLM, ...)
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = with_trailing_slash(url);
        self
    }

    /// Apply a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join("chat/completions")
            .map_err(|e| Error::Config(format!("Invalid chat completions endpoint: {}", e)))
    }

    fn build_body(request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if !request.system.is_empty() {
            messages.push(ChatMessage::new("system", &request.system));
        }
        messages.push(ChatMessage::new("user", &request.prompt));

        ChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }

    fn parse_response(response: ChatResponse) -> Result<Completion> {
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Provider("Chat completion returned an empty response".to_string())
            })?;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(Completion { text, usage })
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let url = self.endpoint()?;
        let body = Self::build_body(request);

        trace!(url = %url, "Sending chat request: {:?}", body);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Chat completions API error {}: {}",
                status, text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse chat response: {}", e)))?;

        let completion = Self::parse_response(response)?;

        debug!(
            model = %request.model,
            tokens = completion.usage.map_or(0, |u| u.total_tokens),
            "Chat response received"
        );

        Ok(completion)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            system: "You are a Security Analyst.".to_string(),
            prompt: "Review this code for security issues:\n\neval(input)".to_string(),
            temperature: None,
            max_output_tokens: Some(512),
        }
    }

    #[test]
    fn test_endpoint() {
        let backend = OpenAiBackend::new("sk");
        assert_eq!(
            backend.endpoint().unwrap().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );

        let backend =
            OpenAiBackend::new("sk")
                .with_base_url(Url::parse("https://openrouter.ai/api/v1").unwrap());
        assert_eq!(
            backend.endpoint().unwrap().as_str(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_build_body() {
        let body = serde_json::to_value(OpenAiBackend::build_body(&request())).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 512);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Avoid eval." } }],
            "usage": { "prompt_tokens": 20, "completion_tokens": 3, "total_tokens": 23 }
        }))
        .unwrap();

        let completion = OpenAiBackend::parse_response(response).unwrap();
        assert_eq!(completion.text, "Avoid eval.");
        assert_eq!(completion.usage.unwrap().prompt_tokens, 20);
    }

    #[test]
    fn test_parse_response_empty() {
        let response: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(OpenAiBackend::parse_response(response).is_err());

        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert!(OpenAiBackend::parse_response(response).is_err());
    }
}
