//! Audit history events.
//!
//! Events reference documents by filename only. There is no foreign key, so
//! history survives document deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of event recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    UploadSuccess,
    TextExtractFail,
    AnalysisSuccess,
    AnalysisFail,
    DeleteDocument,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UploadSuccess => "UPLOAD_SUCCESS",
            Self::TextExtractFail => "TEXT_EXTRACT_FAIL",
            Self::AnalysisSuccess => "ANALYSIS_SUCCESS",
            Self::AnalysisFail => "ANALYSIS_FAIL",
            Self::DeleteDocument => "DELETE_DOCUMENT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UPLOAD_SUCCESS" => Some(Self::UploadSuccess),
            "TEXT_EXTRACT_FAIL" => Some(Self::TextExtractFail),
            "ANALYSIS_SUCCESS" => Some(Self::AnalysisSuccess),
            "ANALYSIS_FAIL" => Some(Self::AnalysisFail),
            "DELETE_DOCUMENT" => Some(Self::DeleteDocument),
            _ => None,
        }
    }
}

/// A single immutable history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub id: i32,
    pub event_type: EventType,
    pub document_name: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEvent {
    pub fn new(event_type: EventType, document_name: impl Into<String>) -> Self {
        Self {
            id: 0, // Set by database
            event_type,
            document_name: document_name.into(),
            timestamp: Utc::now(),
        }
    }
}
