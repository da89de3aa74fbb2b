//! Secrets management for codecrew
//!
//! Provider API keys are stored separately from configuration to avoid
//! accidental sharing. The secrets file is located at
//! `~/.config/codecrew/secrets.toml` and must have restrictive permissions
//! (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variables (GEMINI_API_KEY, OPENAI_API_KEY)
//! 2. Secrets file (~/.config/codecrew/secrets.toml)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm::Provider;
use crate::{Error, Result};

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Google Gemini credentials
    pub gemini: ProviderSecrets,

    /// OpenAI-compatible endpoint credentials
    pub openai: ProviderSecrets,
}

/// Credentials for one model provider
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderSecrets {
    /// API key
    pub api_key: Option<String>,
}

impl Secrets {
    /// Read `secrets.toml` from the config directory
    ///
    /// A missing file yields empty secrets; keys may still come from the
    /// environment.
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read secrets from `path`, refusing files others can read
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        ensure_private(path)?;

        let raw = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&raw).map_err(|e| {
            Error::Config(format!("Invalid secrets file {}: {}", path.display(), e))
        })?;

        for key in [&mut secrets.gemini.api_key, &mut secrets.openai.api_key]
            .into_iter()
            .flatten()
        {
            *key = key.trim().to_string();
        }

        Ok(secrets)
    }

    /// `~/.config/codecrew/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codecrew").join("secrets.toml"))
    }

    fn file_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Gemini => self.gemini.api_key.as_deref(),
            Provider::OpenAi => self.openai.api_key.as_deref(),
        }
    }

    /// Get the API key for a provider with environment variable override
    ///
    /// Priority: provider env var > secrets file
    pub fn api_key(&self, provider: Provider) -> Option<String> {
        resolve_key(
            std::env::var(provider.env_var()).ok(),
            self.file_key(provider),
        )
    }

    /// Like [`Secrets::api_key`], but a missing key is an error
    pub fn require_api_key(&self, provider: Provider) -> Result<String> {
        self.api_key(provider).ok_or(Error::MissingCredential {
            provider: provider.name(),
            env_var: provider.env_var(),
        })
    }

    /// Write an empty template to the default secrets path, mode 0600
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    /// Create a template secrets file at `path`
    pub fn create_template_at(path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        if path.exists() {
            return Err(Error::Config(format!(
                "{} already exists, edit it instead",
                path.display()
            )));
        }

        let template = r#"# codecrew secrets
# API keys for the model providers. Keep this file out of version control.
# It must stay private to your user (chmod 600).

[gemini]
# Google AI Studio API key
# Create at: https://aistudio.google.com/app/apikey
api_key = ""

[openai]
# Key for an OpenAI-compatible endpoint (only needed for openai/* models)
api_key = ""
"#;

        std::fs::write(path, template).map_err(Error::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your API key");

        Ok(())
    }
}

#[cfg(unix)]
fn ensure_private(path: &PathBuf) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "{} is readable by other users (mode {:o}); run `chmod 600 {}`",
            path.display(),
            mode,
            path.display()
        )));
    }

    debug!(path = %path.display(), mode = format!("{:o}", mode), "Secrets file is private");
    Ok(())
}

#[cfg(not(unix))]
fn ensure_private(_path: &PathBuf) -> Result<()> {
    Ok(())
}

fn resolve_key(env_value: Option<String>, file_value: Option<&str>) -> Option<String> {
    if let Some(key) = env_value {
        let key = key.trim().to_string();
        if !key.is_empty() {
            debug!("Using API key from environment variable");
            return Some(key);
        }
    }

    match file_value {
        Some(key) if !key.is_empty() => {
            debug!("Using API key from secrets file");
            Some(key.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_default_secrets() {
        let secrets = Secrets::default();
        assert!(secrets.gemini.api_key.is_none());
        assert!(secrets.openai.api_key.is_none());
    }

    #[test]
    fn test_parse_secrets() {
        let toml = r#"
[gemini]
api_key = "AIza-test"
"#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.gemini.api_key, Some("AIza-test".to_string()));
        assert!(secrets.openai.api_key.is_none());
    }

    #[test]
    fn test_env_value_wins_over_file() {
        let key = resolve_key(Some("from_env".to_string()), Some("from_file"));
        assert_eq!(key, Some("from_env".to_string()));
    }

    #[test]
    fn test_blank_env_value_falls_back_to_file() {
        let key = resolve_key(Some("   ".to_string()), Some("from_file"));
        assert_eq!(key, Some("from_file".to_string()));
    }

    #[test]
    fn test_empty_file_value_is_missing() {
        assert_eq!(resolve_key(None, Some("")), None);
        assert_eq!(resolve_key(None, None), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gemini]\napi_key = \"test\"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let result = Secrets::load_from_file(&file.path().to_path_buf());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("readable by other users"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_permissions_accepted_and_trimmed() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gemini]\napi_key = \"  AIza-test  \"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let secrets = Secrets::load_from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(secrets.gemini.api_key, Some("AIza-test".to_string()));
    }

    #[test]
    fn test_create_template_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codecrew").join("secrets.toml");

        Secrets::create_template_at(&path).unwrap();
        assert!(path.exists());

        let err = Secrets::create_template_at(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[cfg(unix)]
    #[test]
    fn test_created_template_is_loadable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.toml");

        Secrets::create_template_at(&path).unwrap();
        let secrets = Secrets::load_from_file(&path).unwrap();
        // Template ships with blank keys
        assert_eq!(secrets.file_key(Provider::Gemini), Some(""));
    }
}
