//! HTTP surface: `GET /accessibility-check?url=` and `GET /health`.

use a11ycrawl_core::{AccessibilityReport, CrawlOptions, CrawlSettings, execute_crawl};
use a11ycrawl_scanner::RendererLauncher;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub const MISSING_URL_MESSAGE: &str = "URL parameter is required";
pub const CHECK_FAILED_MESSAGE: &str = "An error occurred while running the accessibility check";

#[derive(Clone)]
pub struct AppState {
    pub launcher: Arc<dyn RendererLauncher>,
    pub settings: CrawlSettings,
}

#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/accessibility-check", get(accessibility_check_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    info!("Accessibility check: http://{}/accessibility-check?url=<URL>", addr);
    axum::serve(listener, build_app(state)).await?;
    Ok(())
}

/// Crawl the site at `url` and return one scored entry per audited page.
///
/// Every request gets its own browser. Pages that fail are left out of
/// the result; a failure of the browser itself discards everything and
/// answers 500.
pub async fn accessibility_check_handler(
    State(state): State<AppState>,
    params: Result<Query<CheckParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!("Rejected accessibility check query: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, MISSING_URL_MESSAGE);
        }
    };
    let url = match params.url {
        Some(url) if !url.trim().is_empty() => url,
        _ => return error_response(StatusCode::BAD_REQUEST, MISSING_URL_MESSAGE),
    };

    info!("Accessibility check requested for {}", url);
    let options = CrawlOptions {
        url: url.clone(),
        settings: state.settings,
        show_progress_bars: false,
    };

    match execute_crawl(state.launcher.as_ref(), options, None).await {
        Ok(summary) => {
            let report: AccessibilityReport = summary.report;
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!("Accessibility check for {} failed: {}", url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, CHECK_FAILED_MESSAGE)
        }
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
