//! Configuration management for hostbridge.
//!
//! Configuration can be set via environment variables:
//! - `BRIDGE_TOKEN` - Required. Shared secret expected in the `X-Token` header.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `18080`.
//! - `BRIDGE_TIMEOUT_SECS` - Optional. Seconds a submitter waits for the host
//!   executor before giving up. Defaults to `30`.
//! - `MAX_STEPS` - Optional. Maximum agent loop cycles per turn. Defaults to `12`.
//! - `OPENROUTER_API_KEY` - Optional here; required by the agent binary.
//! - `DEFAULT_MODEL` - Optional. The default LLM model to use. Defaults to
//!   `openai/gpt-4.1-mini`.
//! - `BRIDGE_URL` - Optional. Base URL the agent uses to reach the listener.
//!   Defaults to `http://127.0.0.1:18080`.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Bridge and agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret compared against the `X-Token` header on every route
    pub token: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// How long a submitter waits on a task's completion signal
    pub bridge_timeout_secs: u64,

    /// Hard cap on agent loop cycles within one turn
    pub max_steps: usize,

    /// OpenRouter API key (agent side only)
    pub api_key: Option<String>,

    /// Default LLM model identifier (OpenRouter format)
    pub default_model: String,

    /// Base URL of the request listener, as seen from the agent
    pub bridge_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `BRIDGE_TOKEN` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("BRIDGE_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("BRIDGE_TOKEN".to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "18080".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let bridge_timeout_secs = std::env::var("BRIDGE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("BRIDGE_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        let max_steps = std::env::var("MAX_STEPS")
            .unwrap_or_else(|_| "12".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        let api_key = std::env::var("OPENROUTER_API_KEY").ok();

        let default_model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "openai/gpt-4.1-mini".to_string());

        let bridge_url = std::env::var("BRIDGE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:18080".to_string());

        Ok(Self {
            token,
            host,
            port,
            bridge_timeout_secs,
            max_steps,
            api_key,
            default_model,
            bridge_url,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(token: String) -> Self {
        Self {
            token,
            host: "127.0.0.1".to_string(),
            port: 18080,
            bridge_timeout_secs: 30,
            max_steps: 12,
            api_key: None,
            default_model: "openai/gpt-4.1-mini".to_string(),
            bridge_url: "http://127.0.0.1:18080".to_string(),
        }
    }

    /// Submitter-side wait bound as a `Duration`.
    pub fn bridge_timeout(&self) -> Duration {
        Duration::from_secs(self.bridge_timeout_secs)
    }

    /// The API key, or a typed error naming the missing variable.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))
    }
}
