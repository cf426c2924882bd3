//! PDF-to-text collaborator.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default backend is
//! `pdf-extract`, tests swap in a fixed-text fake.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// True when the payload starts like a PDF file.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_SIGNATURE)
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the document text with one layout line per `\n`.
    async fn extract_text(&self, pdf: Bytes) -> Result<String, AppError>;
}

/// Extracts text with `pdf-extract`. Parsing is CPU-bound, so it runs on the
/// blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, pdf: Bytes) -> Result<String, AppError> {
        let size = pdf.len();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
            .map_err(|e| {
                warn!("pdf-extract failed on {size} byte upload: {e}");
                AppError::Extraction(e.to_string())
            })?;
        debug!("Extracted {} chars from {size} byte PDF", text.len());
        Ok(text)
    }
}
