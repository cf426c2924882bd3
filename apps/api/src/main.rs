use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_import::config::Config;
use resume_import::import::extractor::PdfTextExtractor;
use resume_import::linkedin::ProfileClient;
use resume_import::routes::build_router;
use resume_import::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level below can come from it
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = &config.rust_log;
            EnvFilter::new(format!(
                "resume_import={level},resume_import_api={level},tower_http={level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume import API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Upload limit: {} bytes, header anchor: {}",
        config.max_upload_bytes,
        if config.profile_owner_name.is_some() {
            "configured owner name"
        } else {
            "first text line"
        }
    );

    let profiles = ProfileClient::new(config.scrape_timeout_secs)?;
    info!(
        "Profile client initialized (timeout: {}s)",
        config.scrape_timeout_secs
    );

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(PdfTextExtractor),
        profiles,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the editor is served from a different origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
