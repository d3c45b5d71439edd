//! Document model for uploaded PDFs and their analysis state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis status of a document.
///
/// The string forms are what gets stored and returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Analyzed")]
    Analyzed,
    #[serde(rename = "Analysis Failed")]
    AnalysisFailed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Analyzed => "Analyzed",
            Self::AnalysisFailed => "Analysis Failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Analyzed" => Some(Self::Analyzed),
            "Analysis Failed" => Some(Self::AnalysisFailed),
            _ => None,
        }
    }
}

/// An uploaded legal document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Database row ID.
    pub id: i32,
    /// Original upload filename.
    pub filename: String,
    /// When the document was uploaded.
    pub upload_date: DateTime<Utc>,
    /// Current analysis status.
    pub status: DocumentStatus,
    /// LLM output, or the error message when analysis failed.
    pub summary: Option<String>,
    /// Text extracted from the PDF.
    pub full_text: Option<String>,
    /// Model name requested by the client for this document.
    pub model_used: Option<String>,
}

impl Document {
    /// Create a new document that has not been stored yet.
    pub fn new(filename: impl Into<String>, status: DocumentStatus) -> Self {
        Self {
            id: 0, // Set by database
            filename: filename.into(),
            upload_date: Utc::now(),
            status,
            summary: None,
            full_text: None,
            model_used: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_full_text(mut self, text: impl Into<String>) -> Self {
        self.full_text = Some(text.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_used = Some(model.into());
        self
    }

    /// Record a successful analysis.
    pub fn mark_analyzed(&mut self, summary: String) {
        self.status = DocumentStatus::Analyzed;
        self.summary = Some(summary);
    }

    /// Record a failed analysis with the message shown to the user.
    pub fn mark_failed(&mut self, message: String) {
        self.status = DocumentStatus::AnalysisFailed;
        self.summary = Some(message);
    }
}
