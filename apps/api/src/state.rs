use std::sync::Arc;

use crate::config::Config;
use crate::import::extractor::TextExtractor;
use crate::linkedin::ProfileClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable PDF-to-text backend. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    pub profiles: ProfileClient,
}
