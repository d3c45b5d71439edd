//! Upload analysis and follow-up question endpoints.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

use super::super::error::ApiError;
use super::super::AppState;
use super::responses::{AskResponse, SimplifyResponse};
use crate::services::{AnalysisError, AskRequest, UploadRequest};

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "pdfFile";

/// Upload a PDF and analyze it.
///
/// Multipart fields: `pdfFile` (required), `model`, `prompt`.
pub async fn simplify(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    let Ok(multipart) = multipart else {
        return Err(AnalysisError::MissingFile.into());
    };
    let request = read_upload(multipart).await?;

    let outcome = state.analysis.analyze_upload(request).await?;

    Ok(Json(SimplifyResponse {
        summary: outcome.summary,
        document_text: outcome.document_text,
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadRequest, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut model = None;
    let mut prompt = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) if file.is_none() => {
                // A part without a filename is a plain form value, not a file.
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let content = field.bytes().await.map_err(multipart_error)?;
                file = Some((filename, content.to_vec()));
            }
            Some("model") => model = Some(field.text().await.map_err(multipart_error)?),
            Some("prompt") => prompt = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let (filename, content) = file.ok_or(AnalysisError::MissingFile)?;
    Ok(UploadRequest {
        filename,
        content,
        model,
        prompt,
    })
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    tracing::warn!("Malformed upload: {}", e);
    let status = e.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(status, e.body_text())
    } else {
        ApiError::bad_request(e.body_text())
    }
}

/// Answer a question about previously extracted document text.
pub async fn ask(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError> {
    let request: AskRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Unreadable ask body: {}", e);
        ApiError::bad_request(AnalysisError::MissingAskFields.to_string())
    })?;

    let answer = state
        .analysis
        .ask(request)
        .await
        .map_err(ApiError::from_question)?;

    Ok(Json(AskResponse { answer }))
}
