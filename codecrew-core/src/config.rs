//! Configuration management for codecrew
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (CODECREW_*)
//! 3. Config file (~/.config/codecrew/config.toml)
//! 4. Default values
//!
//! Credentials never live here, see [`crate::secrets`].

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::crew::FailurePolicy;
use crate::llm::ModelId;
use crate::{Error, Result};

/// Default model identifier, in `provider/model` form
pub const DEFAULT_MODEL: &str = "gemini/gemini-2.0-flash";

/// Model-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier (`provider/model`)
    pub model: String,

    /// Override for the provider's API base URL
    pub base_url: Option<String>,

    /// Sampling temperature
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens per review
    pub max_output_tokens: Option<u32>,

    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: None, // Let the provider use its default
            max_output_tokens: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ModelConfig {
    /// Parse the configured model identifier
    pub fn model_id(&self) -> Result<ModelId> {
        self.model.parse()
    }

    /// Parse the base URL override, if any
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw)
                    .map_err(|e| Error::Config(format!("Invalid base_url '{}': {}", raw, e)))
            })
            .transpose()
    }
}

/// Crew execution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrewConfig {
    /// Pass earlier reviews to later reviewers as context
    pub share_context: bool,

    /// What to do when a single review fails
    pub failure_policy: FailurePolicy,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            share_context: true,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

/// Web server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl ServerConfig {
    /// Returns the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Model configuration
    pub model: ModelConfig,

    /// Crew configuration
    pub crew: CrewConfig,

    /// Web server configuration
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/codecrew/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codecrew").join("config.toml"))
    }

    /// Check the fields that can be malformed
    pub fn validate(&self) -> Result<()> {
        self.model.model_id()?;
        self.model.base_url()?;
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - CODECREW_MODEL: Model identifier
    /// - CODECREW_BASE_URL: Provider base URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("CODECREW_MODEL") {
            self.model.model = model;
        }

        if let Ok(base_url) = std::env::var("CODECREW_BASE_URL") {
            self.model.base_url = Some(base_url);
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, model: Option<String>) -> Self {
        if let Some(m) = model {
            self.model.model = m;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(model: Option<String>) -> Result<Self> {
        let config = Self::load()?.with_env_overrides().with_cli_overrides(model);
        config.validate()?;
        Ok(config)
    }
}
