//! JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::AnalysisError;

/// Message for call failures during upload analysis.
pub const ANALYSIS_CALL_FAILED: &str =
    "Failed to get a response from the AI model. Check server logs for details.";

/// Message for call failures while answering a question.
pub const QUESTION_CALL_FAILED: &str =
    "Failed to get a response for your question. Check server logs for details.";

/// An error rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Document not found.")
    }

    /// Map an error from `/ask`, whose model errors read differently.
    pub fn from_question(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Configuration(e) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("AI model configuration error for chat: {}", e),
            ),
            AnalysisError::Generation(e) => {
                tracing::error!("Error during chat: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, QUESTION_CALL_FAILED)
            }
            other => other.into(),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::MissingFile
            | AnalysisError::EmptyFilename
            | AnalysisError::ExtractionFailed { .. }
            | AnalysisError::MissingAskFields => Self::bad_request(err.to_string()),
            AnalysisError::NotFound(_) => Self::not_found(),
            AnalysisError::Configuration(e) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("AI model configuration error: {}", e),
            ),
            AnalysisError::Generation(e) => {
                tracing::error!("Error during analysis: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_CALL_FAILED)
            }
            AnalysisError::Database(e) => {
                tracing::error!("Database error: {}", e);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database error.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
