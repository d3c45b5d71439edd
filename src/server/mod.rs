//! REST API for uploading, analyzing, and querying legal documents.
//!
//! Endpoints:
//! - `POST /simplify`: upload a PDF and get an analysis
//! - `POST /ask`: follow-up question over extracted text
//! - `GET /documents`, `GET /history`: listings, newest first
//! - `DELETE /document/:id`

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::{AskResponse, DocumentResponse, HistoryEventResponse, SimplifyResponse};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::llm::{GeminiGateway, ModelGateway};
use crate::repository::DbContext;
use crate::services::AnalysisService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
    /// Request body limit applied to every route.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build state from a database context and a model gateway.
    pub fn new(ctx: &DbContext, gateway: Arc<dyn ModelGateway>, max_upload_bytes: usize) -> Self {
        Self {
            analysis: Arc::new(AnalysisService::new(
                ctx.documents(),
                ctx.history(),
                gateway,
            )),
            max_upload_bytes,
        }
    }

    /// Build state backed by Gemini from resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        if !settings.llm.has_api_key() {
            tracing::warn!(
                "GOOGLE_API_KEY not found in environment variables. AI features will not work."
            );
        }
        let gateway = Arc::new(GeminiGateway::new(settings.llm.clone()));
        Self::new(
            &settings.create_db_context(),
            gateway,
            settings.max_upload_bytes,
        )
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::from_settings(settings);
    let app = create_router(state);

    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::extract::test_pdf;
    use crate::llm::testing::StubGateway;
    use crate::models::{Document, DocumentStatus, EventType};

    const BOUNDARY: &str = "legalbrief-test-boundary";

    async fn setup_test_app_with(
        gateway: StubGateway,
        max_upload_bytes: usize,
    ) -> (axum::Router, DbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DbContext::from_sqlite_path(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();

        let state = AppState::new(&ctx, Arc::new(gateway), max_upload_bytes);
        (create_router(state), ctx, dir)
    }

    async fn setup_test_app(gateway: StubGateway) -> (axum::Router, DbContext, tempfile::TempDir) {
        setup_test_app_with(gateway, 32 * 1024 * 1024).await
    }

    enum Part<'a> {
        File(&'a str, &'a str, &'a [u8]),
        Text(&'a str, &'a str),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::File(name, filename, content) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                            name, filename
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}",
                            name, value
                        )
                        .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(parts: &[Part]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/simplify")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_simplify_success() {
        let (app, ctx, _dir) = setup_test_app(StubGateway::replying("### 1.Summary")).await;
        let pdf = test_pdf::build(&[Some("LEAVE AND LICENSE AGREEMENT")]);

        let response = app
            .oneshot(upload_request(&[
                Part::File("pdfFile", "licence.pdf", &pdf),
                Part::Text("model", "gemini-1.5-pro"),
                Part::Text("prompt", "Focus on the lock-in period"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["summary"], "### 1.Summary");
        assert!(json["document_text"]
            .as_str()
            .unwrap()
            .contains("LEAVE AND LICENSE AGREEMENT"));

        let docs = ctx.documents().list_all(Default::default()).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].status, DocumentStatus::Analyzed);
        assert_eq!(docs[0].model_used.as_deref(), Some("gemini-1.5-pro"));
    }

    #[tokio::test]
    async fn test_simplify_missing_file() {
        let (app, ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app
            .oneshot(upload_request(&[Part::Text("prompt", "anything")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No PDF file provided.");
        assert!(ctx.history().list_all(Default::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_simplify_not_multipart() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app
            .oneshot(json_request("POST", "/simplify", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No PDF file provided.");
    }

    #[tokio::test]
    async fn test_simplify_empty_filename() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app
            .oneshot(upload_request(&[Part::File("pdfFile", "", b"")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No selected file.");
    }

    #[tokio::test]
    async fn test_simplify_unreadable_pdf() {
        let (app, ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app
            .oneshot(upload_request(&[Part::File(
                "pdfFile",
                "scan.pdf",
                b"not a pdf at all",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Could not extract text from the PDF."
        );

        let docs = ctx.documents().list_all(Default::default()).await.unwrap();
        assert_eq!(docs[0].status, DocumentStatus::AnalysisFailed);
        assert_eq!(docs[0].summary.as_deref(), Some("Could not extract text from PDF."));
    }

    #[tokio::test]
    async fn test_simplify_without_credential() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::unconfigured()).await;
        let pdf = test_pdf::build(&[Some("POWER OF ATTORNEY")]);

        let response = app
            .oneshot(upload_request(&[Part::File("pdfFile", "poa.pdf", &pdf)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("AI model configuration error: "));
    }

    #[tokio::test]
    async fn test_simplify_generation_failure() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::failing("HTTP 503")).await;
        let pdf = test_pdf::build(&[Some("POWER OF ATTORNEY")]);

        let response = app
            .oneshot(upload_request(&[Part::File("pdfFile", "poa.pdf", &pdf)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "Failed to get a response from the AI model. Check server logs for details."
        );
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_rejected() {
        let (app, ctx, _dir) = setup_test_app_with(StubGateway::replying("unused"), 1024).await;
        let big = vec![b'x'; 4096];

        let response = app
            .oneshot(upload_request(&[Part::File("pdfFile", "big.pdf", &big)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(ctx.documents().list_all(Default::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ask_success() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("Thirty days.")).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/ask",
                r#"{"document_text": "Notice: 30 days", "question": "Notice period?"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["answer"], "Thirty days.");
    }

    #[tokio::test]
    async fn test_ask_missing_question() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        for body in [
            r#"{"document_text": "text"}"#,
            r#"{"document_text": "text", "question": 42}"#,
            "not json",
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/ask", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await["error"],
                "Missing document_text or question in request."
            );
        }
    }

    #[tokio::test]
    async fn test_ask_generation_failure() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::failing("timeout")).await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/ask",
                r#"{"document_text": "text", "question": "q?"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "Failed to get a response for your question. Check server logs for details."
        );
    }

    #[tokio::test]
    async fn test_documents_empty() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app.oneshot(get("/documents")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_documents_newest_first() {
        let (app, ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;
        for name in ["first.pdf", "second.pdf"] {
            ctx.documents()
                .insert(&Document::new(name, DocumentStatus::InProgress))
                .await
                .unwrap();
        }

        let response = app.oneshot(get("/documents")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["filename"], "second.pdf");
        assert_eq!(json[0]["status"], "In Progress");
        assert_eq!(json[1]["filename"], "first.pdf");
        assert!(json[0]["summary"].is_null());
    }

    #[tokio::test]
    async fn test_history_listing() {
        let (app, ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;
        ctx.history()
            .log(EventType::UploadSuccess, "deed.pdf")
            .await
            .unwrap();

        let response = app.oneshot(get("/history")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json[0]["event_type"], "UPLOAD_SUCCESS");
        assert_eq!(json[0]["document_name"], "deed.pdf");
    }

    #[tokio::test]
    async fn test_delete_document() {
        let (app, ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;
        let id = ctx
            .documents()
            .insert(&Document::new("gone.pdf", DocumentStatus::Analyzed))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &format!("/document/{}", id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Document deleted successfully."
        );

        let response = app
            .oneshot(json_request("DELETE", &format!("/document/{}", id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Document not found.");

        let history = ctx.history().list_all(Default::default()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].event_type, EventType::DeleteDocument);
        assert_eq!(history[0].document_name, "gone.pdf");
    }

    #[tokio::test]
    async fn test_delete_non_integer_id() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app
            .oneshot(json_request("DELETE", "/document/abc", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (app, _ctx, _dir) = setup_test_app(StubGateway::replying("unused")).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/documents")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
