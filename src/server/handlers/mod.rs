//! HTTP request handlers for the web server.

mod analysis;
mod documents;
mod responses;

// Re-export handlers for use by the router
pub use analysis::{ask, simplify};
pub use documents::{delete_document, list_documents, list_history};
pub use responses::{AskResponse, DocumentResponse, HistoryEventResponse, SimplifyResponse};
