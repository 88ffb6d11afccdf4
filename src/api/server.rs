// src/api/server.rs
// =============================================================================
// HTTP surface for the web form.
//
// Routes:
//   POST /api/generate-sitemap   body: {"url": "...", "download": "xml|txt|csv"?}
//   GET  /health
//
// With `download` the response is the file itself (Content-Type per format,
// Content-Disposition: attachment). Without it, a JSON preview with every
// format. Errors are JSON: {"error": "..."} with 400 or 500.
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::{handle_generate, ApiError, GenerateRequest, GenerateResponse};
use crate::config::ServerConfig;
use crate::crawl::Crawler;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub crawler: Arc<Crawler>,
}

pub fn build_app(crawler: Crawler) -> Router {
    let state = AppState {
        crawler: Arc::new(crawler),
    };

    Router::new()
        .route("/api/generate-sitemap", post(generate_sitemap_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: ServerConfig, crawler: Crawler) -> Result<()> {
    let app = build_app(crawler);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Starting server on {}", config.addr);
    tracing::info!("Endpoint: POST http://{}/api/generate-sitemap", config.addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

// The body is read as raw bytes so a malformed or non-object body becomes
// our own 400 JSON error rather than axum's default rejection.
async fn generate_sitemap_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<GenerateResponse, ApiError> {
    let request: GenerateRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidBody)?;

    handle_generate(state.crawler.clone(), request).await
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

impl IntoResponse for GenerateResponse {
    fn into_response(self) -> Response {
        match self {
            GenerateResponse::Download { format, content } => {
                let headers = [
                    (header::CONTENT_TYPE, format.content_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", format.filename()),
                    ),
                ];
                (StatusCode::OK, headers, content).into_response()
            }
            GenerateResponse::Preview(preview) => Json(preview).into_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if let ApiError::Internal(cause) = &self {
            tracing::error!(error = ?cause, "Error generating sitemap");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
