//! Model identifiers and the shared model client

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ModelConfig;
use crate::secrets::Secrets;
use crate::{Error, Result};

use super::backend::{backend_for, Completion, CompletionRequest, ModelBackend};

/// Hosted model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Google Gemini (generativelanguage API)
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint
    OpenAi,
}

impl Provider {
    /// Short name used as the model identifier prefix
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            _ => Err(Error::Config(format!("Unknown model provider: {}", s))),
        }
    }
}

/// A `provider/model` identifier such as `gemini/gemini-2.0-flash`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    /// Which provider serves the model
    pub provider: Provider,
    /// Provider-side model name
    pub name: String,
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.name)
    }
}

impl std::str::FromStr for ModelId {
    type Err = Error;

    /// Identifiers without a prefix are Gemini models
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (provider, name) = match s.split_once('/') {
            Some((prefix, name)) => (prefix.parse()?, name),
            None => (Provider::Gemini, s),
        };

        if name.is_empty() {
            return Err(Error::Config("Model identifier must not be empty".to_string()));
        }

        Ok(ModelId {
            provider,
            name: name.to_string(),
        })
    }
}

/// Model-client configuration shared by every agent in a run
///
/// Holds the model identifier, the sampling options and a backend that
/// already carries the credential. Agents keep it behind an `Arc`.
#[derive(Clone)]
pub struct Llm {
    model: ModelId,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
    backend: Arc<dyn ModelBackend>,
}

impl fmt::Debug for Llm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Llm")
            .field("model", &self.model.to_string())
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Llm {
    /// Create a client for `model` served by `backend`
    pub fn new(model: ModelId, backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            model,
            temperature: None,
            max_output_tokens: None,
            backend,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the generated token limit
    pub fn with_max_output_tokens(mut self, max: Option<u32>) -> Self {
        self.max_output_tokens = max;
        self
    }

    /// Build the client from configuration, resolving the credential first
    ///
    /// A missing credential fails here, before any agent exists.
    pub fn from_config(config: &ModelConfig, secrets: &Secrets) -> Result<Self> {
        let model = config.model_id()?;
        let api_key = secrets.require_api_key(model.provider)?;
        Self::from_config_with_key(config, &api_key)
    }

    /// Build the client from configuration and an explicit API key
    pub fn from_config_with_key(config: &ModelConfig, api_key: &str) -> Result<Self> {
        let model = config.model_id()?;
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::MissingCredential {
                provider: model.provider.name(),
                env_var: model.provider.env_var(),
            });
        }

        let backend = backend_for(
            model.provider,
            api_key,
            config.base_url()?,
            config.timeout,
        )?;

        debug!(model = %model, backend = backend.name(), "Model client configured");

        Ok(Self::new(model, backend)
            .with_temperature(config.temperature)
            .with_max_output_tokens(config.max_output_tokens))
    }

    /// The model identifier
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// The backend's name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Send one system + user prompt pair to the model
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<Completion> {
        let request = CompletionRequest {
            model: self.model.name.clone(),
            system: system.to_string(),
            prompt: prompt.to_string(),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        self.backend.complete(&request).await
    }
}
