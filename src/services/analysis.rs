//! Document analysis pipeline.
//!
//! Upload: log the upload, extract text, store the document, ask the model for
//! an analysis and record the outcome. Every status change is paired with one
//! history event.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::extract::extract_text_blocking;
use crate::llm::prompts::{build_analysis_prompt, build_qa_prompt, seed_history, DEFAULT_USER_PROMPT};
use crate::llm::{LlmError, ModelGateway, DEFAULT_MODEL};
use crate::models::{Document, DocumentStatus, EventType, HistoryEvent};
use crate::repository::{DbError, DieselDocumentRepository, DieselHistoryRepository, SortOrder};

/// Summary stored on documents whose text could not be extracted.
pub const EXTRACTION_FAILED_SUMMARY: &str = "Could not extract text from PDF.";

/// Errors from the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No PDF file provided.")]
    MissingFile,

    #[error("No selected file.")]
    EmptyFilename,

    #[error("Could not extract text from the PDF.")]
    ExtractionFailed { document_id: i32 },

    #[error("Missing document_text or question in request.")]
    MissingAskFields,

    #[error("Document not found.")]
    NotFound(i32),

    /// Credential or model setup problem.
    #[error("{0}")]
    Configuration(LlmError),

    /// The generation call itself failed.
    #[error("{0}")]
    Generation(LlmError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<LlmError> for AnalysisError {
    fn from(e: LlmError) -> Self {
        if e.is_configuration() {
            Self::Configuration(e)
        } else {
            Self::Generation(e)
        }
    }
}

/// An uploaded PDF to analyze.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub filename: String,
    pub content: Vec<u8>,
    /// Requested model; `None` means the default.
    pub model: Option<String>,
    /// User instruction; `None` means the default instruction.
    pub prompt: Option<String>,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub document_id: i32,
    pub summary: String,
    pub document_text: String,
}

/// A follow-up question about a document's text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    pub document_text: Option<String>,
    pub question: Option<String>,
    pub model: Option<String>,
}

/// Orchestrates extraction, prompting, model calls, and persistence.
#[derive(Clone)]
pub struct AnalysisService {
    documents: DieselDocumentRepository,
    history: DieselHistoryRepository,
    gateway: Arc<dyn ModelGateway>,
}

impl AnalysisService {
    pub fn new(
        documents: DieselDocumentRepository,
        history: DieselHistoryRepository,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            documents,
            history,
            gateway,
        }
    }

    /// Analyze an uploaded PDF and store the result.
    pub async fn analyze_upload(
        &self,
        request: UploadRequest,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let UploadRequest {
            filename,
            content,
            model,
            prompt,
        } = request;

        if filename.is_empty() {
            return Err(AnalysisError::EmptyFilename);
        }
        let model_name = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        self.history.log(EventType::UploadSuccess, &filename).await?;

        let Some(document_text) = extract_text_blocking(content).await else {
            let doc = Document::new(filename.as_str(), DocumentStatus::AnalysisFailed)
                .with_summary(EXTRACTION_FAILED_SUMMARY)
                .with_model(model_name);
            let document_id = self.documents.insert(&doc).await?;
            self.history
                .log(EventType::TextExtractFail, &filename)
                .await?;
            warn!("No text extracted from {} (document {})", filename, document_id);
            return Err(AnalysisError::ExtractionFailed { document_id });
        };

        let mut doc = Document::new(filename, DocumentStatus::InProgress)
            .with_full_text(document_text.as_str())
            .with_model(model_name.as_str());
        doc.id = self.documents.insert(&doc).await?;
        info!("Analyzing {} (document {})", doc.filename, doc.id);

        let full_prompt = build_analysis_prompt(
            &document_text,
            prompt.as_deref().unwrap_or(DEFAULT_USER_PROMPT),
        );

        let result = match self.gateway.model(&model_name) {
            Ok(model) => model.generate(&full_prompt).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(summary) => {
                doc.mark_analyzed(summary.clone());
                self.save(&doc).await?;
                self.history
                    .log(EventType::AnalysisSuccess, &doc.filename)
                    .await?;
                info!("Analysis complete for document {}", doc.id);

                Ok(AnalysisOutcome {
                    document_id: doc.id,
                    summary,
                    document_text,
                })
            }
            Err(e) => {
                let message = if e.is_configuration() {
                    format!("API Error: {}", e)
                } else {
                    format!("Analysis failed: {}", e)
                };
                warn!("Analysis of document {} failed: {}", doc.id, e);

                doc.mark_failed(message);
                self.save(&doc).await?;
                self.history
                    .log(EventType::AnalysisFail, &doc.filename)
                    .await?;

                Err(e.into())
            }
        }
    }

    /// Answer a question using only the supplied document text.
    ///
    /// Nothing is persisted.
    pub async fn ask(&self, request: AskRequest) -> Result<String, AnalysisError> {
        let (Some(document_text), Some(question)) = (request.document_text, request.question)
        else {
            return Err(AnalysisError::MissingAskFields);
        };
        let model_name = request.model.as_deref().unwrap_or(DEFAULT_MODEL);

        let qa_prompt = build_qa_prompt(&document_text, &question);
        let model = self.gateway.model(model_name)?;
        let answer = model.chat(&seed_history(&document_text), &qa_prompt).await?;

        Ok(answer)
    }

    /// All documents, newest upload first.
    pub async fn list_documents(&self) -> Result<Vec<Document>, AnalysisError> {
        Ok(self.documents.list_all(SortOrder::NewestFirst).await?)
    }

    /// All history events, newest first.
    pub async fn list_history(&self) -> Result<Vec<HistoryEvent>, AnalysisError> {
        Ok(self.history.list_all(SortOrder::NewestFirst).await?)
    }

    /// Delete a document and record the deletion.
    pub async fn delete_document(&self, id: i32) -> Result<Document, AnalysisError> {
        let doc = self
            .documents
            .get(id)
            .await?
            .ok_or(AnalysisError::NotFound(id))?;

        if !self.documents.delete_by_id(id).await? {
            return Err(AnalysisError::NotFound(id));
        }
        self.history
            .log(EventType::DeleteDocument, &doc.filename)
            .await?;
        info!("Deleted document {} ({})", id, doc.filename);

        Ok(doc)
    }

    async fn save(&self, doc: &Document) -> Result<(), AnalysisError> {
        if !self.documents.update(doc).await? {
            warn!(
                "Document {} was removed before its status could be saved",
                doc.id
            );
        }
        Ok(())
    }
}
