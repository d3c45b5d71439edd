//! Database context for managing connections and repository access.
//!
//! Create one context at startup and hand its repositories to the services
//! that need them.
//!
//! # Example
//! ```ignore
//! let ctx = DbContext::from_url("sqlite:documents.db");
//! ctx.init_schema().await?;
//! let docs = ctx.documents().list_all(SortOrder::NewestFirst).await?;
//! ```

use std::path::Path;

use diesel_async::SimpleAsyncConnection;
use tracing::debug;

use super::documents::DieselDocumentRepository;
use super::history::DieselHistoryRepository;
use super::pool::{DbError, SqlitePool};

#[derive(Clone)]
pub struct DbContext {
    pool: SqlitePool,
}

impl DbContext {
    /// Create a context from a database URL (`sqlite:path` or a plain path).
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: SqlitePool::new(database_url),
        }
    }

    /// Create a context from a SQLite file path.
    pub fn from_sqlite_path(db_path: &Path) -> Self {
        Self {
            pool: SqlitePool::from_path(db_path),
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get a document repository.
    pub fn documents(&self) -> DieselDocumentRepository {
        DieselDocumentRepository::new(self.pool.clone())
    }

    /// Get a history repository.
    pub fn history(&self) -> DieselHistoryRepository {
        DieselHistoryRepository::new(self.pool.clone())
    }

    /// Create the tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing schema at {}", self.pool.database_url());
        let mut conn = self.pool.get().await?;
        conn.batch_execute(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                upload_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Pending',
                summary TEXT,
                full_text TEXT,
                model_used TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_documents_upload_date
                ON documents(upload_date);

            CREATE TABLE IF NOT EXISTS history_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event_type TEXT NOT NULL,
                document_name TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_events_timestamp
                ON history_events(timestamp);
            "#,
        )
        .await
    }
}
