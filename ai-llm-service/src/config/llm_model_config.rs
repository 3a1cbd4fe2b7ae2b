//! Runtime configuration for the Gemini provider, loaded from environment
//! variables with sensible defaults.

use crate::error_handler::{ConfigError, Result, env_opt_u64, must_env, validate_http_endpoint};

/// Default REST base for the hosted Gemini API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier used when `GEMINI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gemini-1.5-flash"`).
/// - `endpoint`: The API base URL (no trailing path).
/// - `api_key`: API key sent via the `x-goog-api-key` header.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// API base URL (remote endpoint).
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Builds the config from environment variables.
    ///
    /// Required: `GEMINI_API_KEY`.
    /// Optional: `GEMINI_MODEL`, `GEMINI_API_BASE`, `LLM_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] wrapped in the crate error when the API key
    /// is absent, the base URL has no http(s) scheme, or the timeout is not
    /// a valid number.
    pub fn from_env() -> Result<Self> {
        let api_key = must_env("GEMINI_API_KEY")?;

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        if model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let endpoint =
            std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        validate_http_endpoint("GEMINI_API_BASE", &endpoint)?;

        let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?;

        Ok(Self {
            model,
            endpoint,
            api_key,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs,
        })
    }
}
