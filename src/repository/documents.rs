//! Diesel-based document repository for SQLite.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use super::models::{DocumentRecord, LastInsertRowId, NewDocument};
use super::pool::{DbError, SqlitePool};
use super::util::{format_datetime, parse_datetime};
use super::SortOrder;
use crate::models::{Document, DocumentStatus};
use crate::schema::documents;

/// Convert a database record to a domain model.
impl From<DocumentRecord> for Document {
    fn from(record: DocumentRecord) -> Self {
        let status = DocumentStatus::from_str(&record.status).unwrap_or_else(|| {
            warn!(
                "Unknown status '{}' for document {}, treating as pending",
                record.status, record.id
            );
            DocumentStatus::Pending
        });

        Document {
            id: record.id,
            filename: record.filename,
            upload_date: parse_datetime(&record.upload_date),
            status,
            summary: record.summary,
            full_text: record.full_text,
            model_used: record.model_used,
        }
    }
}

/// Diesel-based document repository with compile-time query checking.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: SqlitePool,
}

impl DieselDocumentRepository {
    /// Create a new Diesel document repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new document, returning its assigned ID.
    pub async fn insert(&self, doc: &Document) -> Result<i32, DbError> {
        let mut conn = self.pool.get().await?;
        let upload_date = format_datetime(&doc.upload_date);

        diesel::insert_into(documents::table)
            .values(NewDocument {
                filename: &doc.filename,
                upload_date: &upload_date,
                status: doc.status.as_str(),
                summary: doc.summary.as_deref(),
                full_text: doc.full_text.as_deref(),
                model_used: doc.model_used.as_deref(),
            })
            .execute(&mut conn)
            .await?;

        diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<LastInsertRowId>(&mut conn)
            .await
            .map(|r| r.id as i32)
    }

    /// Persist the mutable fields of a stored document.
    ///
    /// Returns false if the row no longer exists.
    pub async fn update(&self, doc: &Document) -> Result<bool, DbError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::update(documents::table.find(doc.id))
            .set((
                documents::status.eq(doc.status.as_str()),
                documents::summary.eq(doc.summary.as_deref()),
                documents::full_text.eq(doc.full_text.as_deref()),
                documents::model_used.eq(doc.model_used.as_deref()),
            ))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    /// Get a document by ID.
    pub async fn get(&self, id: i32) -> Result<Option<Document>, DbError> {
        let mut conn = self.pool.get().await?;

        documents::table
            .find(id)
            .select(DocumentRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Document::from))
    }

    /// Get all documents ordered by upload date.
    pub async fn list_all(&self, order: SortOrder) -> Result<Vec<Document>, DbError> {
        let mut conn = self.pool.get().await?;

        let query = documents::table.select(DocumentRecord::as_select());
        let records: Vec<DocumentRecord> = match order {
            SortOrder::NewestFirst => {
                query
                    .order((documents::upload_date.desc(), documents::id.desc()))
                    .load(&mut conn)
                    .await?
            }
            SortOrder::OldestFirst => {
                query
                    .order((documents::upload_date.asc(), documents::id.asc()))
                    .load(&mut conn)
                    .await?
            }
        };

        Ok(records.into_iter().map(Document::from).collect())
    }

    /// Delete a document. Returns false if it did not exist.
    pub async fn delete_by_id(&self, id: i32) -> Result<bool, DbError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(documents::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }
}
