//! Service layer for legalbrief business logic.
//!
//! Services hold domain logic separated from HTTP concerns so they can be
//! driven by the web server or tested directly.

pub mod analysis;

pub use analysis::{
    AnalysisError, AnalysisOutcome, AnalysisService, AskRequest, UploadRequest,
    EXTRACTION_FAILED_SUMMARY,
};
