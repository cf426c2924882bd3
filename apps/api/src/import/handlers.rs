//! Axum route handlers for the Import API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::import::builder::{parse_linkedin_text, ImportOptions};
use crate::import::extractor::looks_like_pdf;
use crate::import::review::{review_import, ImportReview};
use crate::models::resume::ParsedResume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImportTextRequest {
    pub text: String,
    #[serde(default)]
    pub owner_name: Option<String>,
}

/// Envelope shared by every import endpoint. `data` is `null` on a soft failure.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub data: Option<ParsedResume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ImportReview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportResponse {
    pub fn parsed(resume: ParsedResume) -> Self {
        let review = review_import(&resume);
        Self {
            success: true,
            data: Some(resume),
            review: Some(review),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            review: None,
            error: Some(error.into()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// The request's owner name wins over the configured one; blanks are ignored.
fn import_options(config: &Config, owner_name: Option<String>) -> ImportOptions {
    let owner_name = owner_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| config.profile_owner_name.clone());
    ImportOptions { owner_name }
}

fn import_text(config: &Config, text: &str, owner_name: Option<String>) -> ImportResponse {
    let options = import_options(config, owner_name);
    let resume = parse_linkedin_text(text, &options);
    let response = ImportResponse::parsed(resume);

    if let (Some(resume), Some(review)) = (&response.data, &response.review) {
        info!(
            "Imported profile: {} experience, {} education, {} certifications, {} skills (score {:.2}, {} issues)",
            resume.experience.len(),
            resume.education.len(),
            resume.certifications.len(),
            resume.skills.len(),
            review.score,
            review.issues.len()
        );
    }
    response
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { size: None, limit }
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/import/linkedin-pdf
///
/// Multipart form: `pdf` (file, required), `owner_name` (text, optional).
pub async fn handle_import_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut pdf: Option<Bytes> = None;
    let mut owner_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("pdf") => {
                pdf = Some(field.bytes().await.map_err(|e| multipart_error(e, limit))?);
            }
            Some("owner_name") => {
                owner_name = Some(field.text().await.map_err(|e| multipart_error(e, limit))?);
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("No PDF file provided".to_string()))?;
    if pdf.len() > limit {
        return Err(AppError::PayloadTooLarge {
            size: Some(pdf.len()),
            limit,
        });
    }
    if !looks_like_pdf(&pdf) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    info!("Extracting text from {} byte PDF upload", pdf.len());
    let text = state.extractor.extract_text(pdf).await?;
    Ok(Json(import_text(&state.config, &text, owner_name)))
}

/// POST /api/v1/import/linkedin-text
pub async fn handle_import_text(
    State(state): State<AppState>,
    Json(req): Json<ImportTextRequest>,
) -> Json<ImportResponse> {
    Json(import_text(&state.config, &req.text, req.owner_name))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::import::extractor::TextExtractor;
    use crate::linkedin::ProfileClient;
    use crate::routes::build_router;

    const PROFILE_TEXT: &str = "\
Kontakt
jane@example.com
Top-Kenntnisse
Rust
Jane Doe
Platform Engineer
Berlin, Germany
Berufserfahrung
Acme Corp
Senior Engineer
Jan 2020 - Present
Built things.
";

    struct FixedText(&'static str);

    #[async_trait]
    impl TextExtractor for FixedText {
        async fn extract_text(&self, _pdf: Bytes) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    fn app(max_upload_bytes: usize) -> Router {
        let state = AppState {
            config: Config {
                max_upload_bytes,
                ..Config::default()
            },
            extractor: Arc::new(FixedText(PROFILE_TEXT)),
            profiles: ProfileClient::new(1).unwrap(),
        };
        build_router(state)
    }

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(b"--XBOUNDARY\r\n");
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"Profile.pdf\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n--XBOUNDARY\r\n");
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"owner_name\"\r\n\r\n");
        body.extend_from_slice(b"Jane Doe");
        body.extend_from_slice(b"\r\n--XBOUNDARY--\r\n");

        Request::builder()
            .method("POST")
            .uri("/api/v1/import/linkedin-pdf")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_request_owner_name_overrides_config() {
        let config = Config {
            profile_owner_name: Some("Configured".to_string()),
            ..Config::default()
        };
        let opts = import_options(&config, Some(" Jane Doe ".to_string()));
        assert_eq!(opts.owner_name.as_deref(), Some("Jane Doe"));
        let opts = import_options(&config, Some("   ".to_string()));
        assert_eq!(opts.owner_name.as_deref(), Some("Configured"));
        let opts = import_options(&Config::default(), None);
        assert!(opts.owner_name.is_none());
    }

    #[tokio::test]
    async fn test_import_text_returns_resume_and_review() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/import/linkedin-text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({ "text": PROFILE_TEXT, "owner_name": "Jane Doe" }).to_string(),
            ))
            .unwrap();

        let response = app(1024).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["header"]["name"], "Jane Doe");
        assert_eq!(body["data"]["header"]["title"], "Platform Engineer");
        assert_eq!(body["data"]["header"]["email"], "jane@example.com");
        assert_eq!(body["data"]["skills"], serde_json::json!(["Rust"]));
        assert_eq!(body["data"]["experience"][0]["workplace"], "Acme Corp");
        assert_eq!(body["data"]["experience"][0]["startDate"], "01/2020");
        assert_eq!(body["review"]["complete"], true);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_import_empty_text_is_soft_skeleton() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/import/linkedin-text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": ""}"#))
            .unwrap();

        let response = app(1024).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["experience"], serde_json::json!([]));
        assert_eq!(body["review"]["complete"], false);
    }

    #[tokio::test]
    async fn test_import_pdf_uses_extractor() {
        let response = app(1024)
            .oneshot(multipart_request("pdf", b"%PDF-1.4 stub"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["header"]["name"], "Jane Doe");
        assert_eq!(body["data"]["experience"][0]["position"], "Senior Engineer");
    }

    #[tokio::test]
    async fn test_import_pdf_missing_file_field() {
        let response = app(1024)
            .oneshot(multipart_request("attachment", b"%PDF-1.4 stub"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_import_pdf_rejects_non_pdf() {
        let response = app(1024)
            .oneshot(multipart_request("pdf", b"PK\x03\x04 docx"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_pdf_over_limit() {
        let response = app(8)
            .oneshot(multipart_request("pdf", b"%PDF-1.4 much longer than eight bytes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
