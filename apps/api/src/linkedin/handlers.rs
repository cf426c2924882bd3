use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::import::handlers::ImportResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub linkedin_url: String,
}

/// POST /api/v1/import/linkedin-profile
///
/// An unusable URL is a 400. A blocked or failed fetch is reported in the
/// body with `success: false` so the editor can fall back to PDF import.
pub async fn handle_import_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    if req.linkedin_url.trim().is_empty() {
        return Err(AppError::Validation("LinkedIn URL is required".to_string()));
    }

    match state.profiles.fetch_profile(req.linkedin_url.trim()).await {
        Ok(resume) => Ok(Json(ImportResponse::parsed(resume))),
        Err(AppError::Upstream(msg)) => {
            warn!("Profile fetch failed: {msg}");
            Ok(Json(ImportResponse::failed(
                "Could not fetch LinkedIn profile. LinkedIn may be blocking the request.",
            )))
        }
        Err(e) => Err(e),
    }
}
