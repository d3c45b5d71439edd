//! Data models for legalbrief.
//!
//! These are plain data structs; persistence lives in `crate::repository`.

mod document;
mod history;

pub use document::{Document, DocumentStatus};
pub use history::{EventType, HistoryEvent};
