//! Runtime configuration.
//!
//! Loaded from environment variables (a `.env` file is honored via
//! `dotenvy`). Everything has a default except the API token, which is
//! optional: the public inference endpoint accepts unauthenticated
//! requests at a reduced rate limit.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default extractive QA model identifier.
pub const DEFAULT_MODEL: &str = "distilbert-base-uncased-distilled-squad";

/// Default inference API base URL.
pub const DEFAULT_API_URL: &str = "https://api-inference.huggingface.co";

/// Runtime configuration for the tool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier of the hosted extractive QA model.
    pub model_id: String,
    /// Base URL of the inference API.
    pub api_base_url: String,
    /// Bearer token for the inference API, if any.
    pub api_token: Option<SecretString>,
    /// HTTP timeout for a single model invocation.
    pub request_timeout: Duration,
    /// Number of history entries shown by `/history`.
    pub history_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(60),
            history_window: 5,
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Best-effort: a missing .env file is fine.
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Ok(model) = std::env::var("PDFCHAT_MODEL")
            && !model.is_empty()
        {
            config.model_id = model;
        }

        if let Ok(url) = std::env::var("PDFCHAT_API_URL")
            && !url.is_empty()
        {
            config.api_base_url = url;
        }

        if let Ok(token) = std::env::var("HF_API_TOKEN")
            && !token.is_empty()
        {
            config.api_token = Some(SecretString::from(token));
        }

        if let Ok(secs) = std::env::var("PDFCHAT_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PDFCHAT_TIMEOUT_SECS".to_string(),
                message: format!("expected a positive integer, got {:?}", secs),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Ok(window) = std::env::var("PDFCHAT_HISTORY_WINDOW") {
            let window: usize = window.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PDFCHAT_HISTORY_WINDOW".to_string(),
                message: format!("expected a positive integer, got {:?}", window),
            })?;
            if window == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "PDFCHAT_HISTORY_WINDOW".to_string(),
                    message: "window must be at least 1".to_string(),
                });
            }
            config.history_window = window;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model_id, DEFAULT_MODEL);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.history_window, 5);
    }
}
