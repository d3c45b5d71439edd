//! Text extraction from uploaded PDFs using lopdf.

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to load PDF: {0}")]
    Load(String),

    #[error("No extractable text in {pages} page(s)")]
    NoText { pages: usize },

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Extract the text of every page that has any, concatenated in page order.
///
/// Pages that fail to decode or yield no text are skipped; whitespace-only
/// pages are kept so the page layout survives.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Load(e.to_string()))?;

    let pages = doc.get_pages();
    let mut text = String::new();

    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) if !page_text.is_empty() => text.push_str(&page_text),
            Ok(_) => debug!("Page {} has no extractable text", page_num),
            Err(e) => debug!("Skipping page {}: {}", page_num, e),
        }
    }

    if text.trim().is_empty() {
        return Err(ExtractError::NoText { pages: pages.len() });
    }

    Ok(text)
}

/// Extract text, collapsing any failure to `None`.
pub fn extract_text(bytes: &[u8]) -> Option<String> {
    match extract_pdf_text(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Error extracting text from PDF: {}", e);
            None
        }
    }
}

/// Run extraction on the blocking pool.
pub async fn extract_text_blocking(bytes: Vec<u8>) -> Option<String> {
    match tokio::task::spawn_blocking(move || extract_text(&bytes)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("{}", ExtractError::Task(e.to_string()));
            None
        }
    }
}
