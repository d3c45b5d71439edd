//! Diesel ORM records for the database tables.
//!
//! Records mirror the stored columns; conversion to the plain models in
//! `crate::models` happens in the repositories.

use diesel::prelude::*;

use crate::schema;

/// Document record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRecord {
    pub id: i32,
    pub filename: String,
    pub upload_date: String,
    pub status: String,
    pub summary: Option<String>,
    pub full_text: Option<String>,
    pub model_used: Option<String>,
}

/// New document for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::documents)]
pub struct NewDocument<'a> {
    pub filename: &'a str,
    pub upload_date: &'a str,
    pub status: &'a str,
    pub summary: Option<&'a str>,
    pub full_text: Option<&'a str>,
    pub model_used: Option<&'a str>,
}

/// History event record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::history_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryEventRecord {
    pub id: i32,
    pub event_type: String,
    pub document_name: String,
    pub timestamp: String,
}

/// New history event for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::history_events)]
pub struct NewHistoryEvent<'a> {
    pub event_type: &'a str,
    pub document_name: &'a str,
    pub timestamp: &'a str,
}

/// Row returned by `SELECT last_insert_rowid() AS id`.
#[derive(QueryableByName, Debug)]
pub struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
}
