//! Diesel-based history event repository for SQLite.
//!
//! The history table is append-only: there is no update or delete.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use super::models::{HistoryEventRecord, LastInsertRowId, NewHistoryEvent};
use super::pool::{DbError, SqlitePool};
use super::util::{format_datetime, parse_datetime};
use super::SortOrder;
use crate::models::{EventType, HistoryEvent};
use crate::schema::history_events;

impl HistoryEventRecord {
    /// Convert to a domain model, skipping rows with an unknown event type.
    fn into_event(self) -> Option<HistoryEvent> {
        let Some(event_type) = EventType::from_str(&self.event_type) else {
            warn!(
                "Skipping history event {} with unknown type '{}'",
                self.id, self.event_type
            );
            return None;
        };

        Some(HistoryEvent {
            id: self.id,
            event_type,
            document_name: self.document_name,
            timestamp: parse_datetime(&self.timestamp),
        })
    }
}

/// Diesel-based history repository.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: SqlitePool,
}

impl DieselHistoryRepository {
    /// Create a new Diesel history repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an event, returning its assigned ID.
    pub async fn insert(&self, event: &HistoryEvent) -> Result<i32, DbError> {
        let mut conn = self.pool.get().await?;
        let timestamp = format_datetime(&event.timestamp);

        diesel::insert_into(history_events::table)
            .values(NewHistoryEvent {
                event_type: event.event_type.as_str(),
                document_name: &event.document_name,
                timestamp: &timestamp,
            })
            .execute(&mut conn)
            .await?;

        diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<LastInsertRowId>(&mut conn)
            .await
            .map(|r| r.id as i32)
    }

    /// Record a new event for a document name, timestamped now.
    pub async fn log(&self, event_type: EventType, document_name: &str) -> Result<i32, DbError> {
        debug!("History: {} {}", event_type.as_str(), document_name);
        self.insert(&HistoryEvent::new(event_type, document_name))
            .await
    }

    /// Get all events ordered by timestamp.
    pub async fn list_all(&self, order: SortOrder) -> Result<Vec<HistoryEvent>, DbError> {
        let mut conn = self.pool.get().await?;

        let query = history_events::table.select(HistoryEventRecord::as_select());
        let records: Vec<HistoryEventRecord> = match order {
            SortOrder::NewestFirst => {
                query
                    .order((history_events::timestamp.desc(), history_events::id.desc()))
                    .load(&mut conn)
                    .await?
            }
            SortOrder::OldestFirst => {
                query
                    .order((history_events::timestamp.asc(), history_events::id.asc()))
                    .load(&mut conn)
                    .await?
            }
        };

        Ok(records
            .into_iter()
            .filter_map(HistoryEventRecord::into_event)
            .collect())
    }
}
