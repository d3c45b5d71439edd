//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM with compile-time query checking
//! against a file-backed SQLite database.

pub mod context;
pub mod documents;
pub mod history;
pub mod models;
pub mod pool;
pub mod util;

pub use context::DbContext;
pub use documents::DieselDocumentRepository;
pub use history::DieselHistoryRepository;
pub use pool::{DbError, SqlitePool};

/// Ordering for `list_all` queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent timestamp first.
    #[default]
    NewestFirst,
    OldestFirst,
}
