//! Model name resolution and handle construction.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::{GeminiModel, GenerativeModel, LlmConfig, LlmError};

/// Model names clients may request.
pub const ALLOWED_MODELS: [&str; 2] = ["gemini-1.5-pro", "gemini-1.5-flash"];

/// Model used when the request names none or an unknown one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Map a requested model name onto the allow-list.
///
/// Unknown names fall back to [`DEFAULT_MODEL`]; this never fails.
pub fn resolve_model_name(requested: &str) -> &'static str {
    match ALLOWED_MODELS.iter().find(|m| **m == requested) {
        Some(&model) => model,
        None => {
            warn!(
                "Invalid model '{}' requested. Defaulting to '{}'.",
                requested, DEFAULT_MODEL
            );
            DEFAULT_MODEL
        }
    }
}

/// Source of model handles.
pub trait ModelGateway: Send + Sync {
    /// Get a handle for the requested model name.
    fn model(&self, requested: &str) -> Result<Arc<dyn GenerativeModel>, LlmError>;
}

/// Gateway producing Gemini model handles.
pub struct GeminiGateway {
    config: LlmConfig,
}

impl GeminiGateway {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }
}

impl ModelGateway for GeminiGateway {
    fn model(&self, requested: &str) -> Result<Arc<dyn GenerativeModel>, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::MissingCredential)?;

        let model = resolve_model_name(requested);

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .build()
            .map_err(|e| LlmError::ModelInit {
                model: model.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Using Gemini model {}", model);
        Ok(Arc::new(GeminiModel::new(
            client,
            &self.config,
            api_key,
            model,
        )))
    }
}
