//! legalbrief - legal document analysis service.
//!
//! Accepts PDF uploads, extracts their text, asks Gemini for a structured
//! analysis framed for Indian law, and answers follow-up questions. Documents
//! and an append-only history log live in SQLite.

pub mod cli;
pub mod config;
pub mod extract;
pub mod llm;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
