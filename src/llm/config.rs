//! Gemini client configuration.

use serde::{Deserialize, Serialize};

/// Default Generative Language API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL (without the `/models/...` suffix)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API credential. Usually supplied through the environment, not the config file.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens in a response
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// HTTP timeout for a single generation call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `GOOGLE_API_KEY`: API credential (falls back to `GEMINI_API_KEY`)
    /// - `GEMINI_ENDPOINT`: API base URL
    /// - `GEMINI_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `GEMINI_MAX_OUTPUT_TOKENS`: Maximum tokens in a response
    /// - `GEMINI_TIMEOUT_SECS`: HTTP timeout per call
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_non_empty("GOOGLE_API_KEY").or_else(|| env_non_empty("GEMINI_API_KEY"))
        {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = env_non_empty("GEMINI_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(val) = env_non_empty("GEMINI_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Some(val) = env_non_empty("GEMINI_MAX_OUTPUT_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_output_tokens = n;
            }
        }
        if let Some(val) = env_non_empty("GEMINI_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.request_timeout_secs = n;
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Whether a non-empty credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
