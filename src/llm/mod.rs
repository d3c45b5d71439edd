//! LLM access for document analysis and follow-up Q&A.
//!
//! The gateway resolves a requested model name to a [`GenerativeModel`]
//! handle. Gemini is the only backend.

mod config;
mod gateway;
mod gemini;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

pub use config::{LlmConfig, DEFAULT_ENDPOINT};
pub use gateway::{resolve_model_name, GeminiGateway, ModelGateway, ALLOWED_MODELS, DEFAULT_MODEL};
pub use gemini::GeminiModel;

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One turn of a multi-turn conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// A handle to a text generation model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Name of the resolved model.
    fn name(&self) -> &str;

    /// Generate a reply to a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Send `message` after the given conversation history and return the reply.
    async fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, LlmError>;
}

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API credential configured
    #[error("GOOGLE_API_KEY is not set. Cannot initialize Gemini model.")]
    MissingCredential,
    /// The model handle could not be constructed
    #[error("Failed to initialize Gemini model '{model}'. Ensure API key is valid and model exists: {reason}")]
    ModelInit { model: String, reason: String },
    /// Failed to reach the service
    #[error("Connection error: {0}")]
    Connection(String),
    /// Service returned an error
    #[error("API error: {0}")]
    Api(String),
    /// Failed to parse the response
    #[error("Parse error: {0}")]
    Parse(String),
    /// Response contained no text
    #[error("Empty response from model")]
    EmptyResponse,
}

impl LlmError {
    /// Configuration errors come from credentials or model setup, not from a call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::ModelInit { .. })
    }
}


/// In-memory gateway for tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{resolve_model_name, ChatTurn, GenerativeModel, LlmError, ModelGateway};

    /// What every model handed out by the stub does.
    #[derive(Debug, Clone)]
    pub enum StubOutcome {
        Reply(String),
        Fail(String),
        MissingCredential,
    }

    /// A recorded model call.
    #[derive(Debug, Clone)]
    pub struct StubCall {
        pub model: String,
        pub history: Vec<ChatTurn>,
        pub message: String,
    }

    pub struct StubGateway {
        outcome: StubOutcome,
        calls: Arc<Mutex<Vec<StubCall>>>,
    }

    impl StubGateway {
        pub fn replying(text: &str) -> Self {
            Self::with_outcome(StubOutcome::Reply(text.to_string()))
        }

        pub fn failing(message: &str) -> Self {
            Self::with_outcome(StubOutcome::Fail(message.to_string()))
        }

        pub fn unconfigured() -> Self {
            Self::with_outcome(StubOutcome::MissingCredential)
        }

        fn with_outcome(outcome: StubOutcome) -> Self {
            Self {
                outcome,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn calls(&self) -> Vec<StubCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ModelGateway for StubGateway {
        fn model(&self, requested: &str) -> Result<Arc<dyn GenerativeModel>, LlmError> {
            if matches!(self.outcome, StubOutcome::MissingCredential) {
                return Err(LlmError::MissingCredential);
            }
            Ok(Arc::new(StubModel {
                name: resolve_model_name(requested).to_string(),
                outcome: self.outcome.clone(),
                calls: self.calls.clone(),
            }))
        }
    }

    struct StubModel {
        name: String,
        outcome: StubOutcome,
        calls: Arc<Mutex<Vec<StubCall>>>,
    }

    #[async_trait]
    impl GenerativeModel for StubModel {
        fn name(&self) -> &str {
            &self.name
        }

        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.chat(&[], prompt).await
        }

        async fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(StubCall {
                model: self.name.clone(),
                history: history.to_vec(),
                message: message.to_string(),
            });
            match &self.outcome {
                StubOutcome::Reply(text) => Ok(text.clone()),
                StubOutcome::Fail(message) => Err(LlmError::Api(message.clone())),
                StubOutcome::MissingCredential => Err(LlmError::MissingCredential),
            }
        }
    }
}
