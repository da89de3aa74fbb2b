//! Error types for codecrew

use thiserror::Error;

/// Result type alias for codecrew operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for codecrew operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key available for the configured provider
    #[error("API key not found for {provider}. Please set the {env_var} environment variable or run `codecrew secrets init`.")]
    MissingCredential {
        /// Provider name (e.g. "gemini")
        provider: &'static str,
        /// Environment variable that would supply the key
        env_var: &'static str,
    },

    /// The submitted code was empty after trimming
    #[error("Please paste some code before running.")]
    EmptyInput,

    /// Model provider error (HTTP failure, bad status, unparseable response)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Crew orchestration error
    #[error("Crew error: {0}")]
    Crew(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Provider(format!("request timed out: {}", err))
        } else {
            Error::Provider(format!("HTTP request failed: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_message() {
        let err = Error::MissingCredential {
            provider: "gemini",
            env_var: "GEMINI_API_KEY",
        };
        let msg = err.to_string();
        assert!(msg.contains("gemini"));
        assert!(msg.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_empty_input_message() {
        assert_eq!(
            Error::EmptyInput.to_string(),
            "Please paste some code before running."
        );
    }
}
