//! Document and history listing, document deletion.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use super::super::error::ApiError;
use super::super::AppState;
use super::responses::{DocumentResponse, HistoryEventResponse};

/// List all documents, newest upload first.
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
    let documents = state.analysis.list_documents().await?;
    Ok(Json(documents.into_iter().map(Into::into).collect()))
}

/// List the full history log, newest first.
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEventResponse>>, ApiError> {
    let events = state.analysis.list_history().await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Delete a document by ID.
pub async fn delete_document(
    State(state): State<AppState>,
    doc_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    // Only integer IDs name a document.
    let Ok(Path(doc_id)) = doc_id else {
        return Err(ApiError::not_found());
    };

    state.analysis.delete_document(doc_id).await?;
    Ok(Json(json!({ "message": "Document deleted successfully." })))
}
