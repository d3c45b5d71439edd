//! Response bodies.

use serde::Serialize;

use crate::models::{Document, HistoryEvent};

const UPLOAD_DATE_FORMAT: &str = "%b %d, %Y";
const EVENT_TIMESTAMP_FORMAT: &str = "%b %d, %Y, %I:%M %p";

/// Document as listed by `GET /documents`.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: i32,
    pub filename: String,
    pub upload_date: String,
    pub status: String,
    pub summary: Option<String>,
    pub full_text: Option<String>,
    pub model_used: Option<String>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename,
            upload_date: doc.upload_date.format(UPLOAD_DATE_FORMAT).to_string(),
            status: doc.status.as_str().to_string(),
            summary: doc.summary,
            full_text: doc.full_text,
            model_used: doc.model_used,
        }
    }
}

/// History event as listed by `GET /history`.
#[derive(Debug, Serialize)]
pub struct HistoryEventResponse {
    pub id: i32,
    pub event_type: String,
    pub document_name: String,
    pub timestamp: String,
}

impl From<HistoryEvent> for HistoryEventResponse {
    fn from(event: HistoryEvent) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type.as_str().to_string(),
            document_name: event.document_name,
            timestamp: event.timestamp.format(EVENT_TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Body of a successful `POST /simplify`.
#[derive(Debug, Serialize)]
pub struct SimplifyResponse {
    pub summary: String,
    pub document_text: String,
}

/// Body of a successful `POST /ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}
