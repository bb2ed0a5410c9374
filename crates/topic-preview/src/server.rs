//! HTTP server for the preview endpoints
//!
//! Provides /health and /api/topic/{id}/preview?slug=... endpoints.

use crate::preview::PreviewService;
use crate::types::HealthResponse;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub previews: PreviewService,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(previews: PreviewService) -> Self {
        Self {
            previews,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Preview query parameters
#[derive(Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    slug: Option<String>,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/topic/{id}/preview", get(get_preview))
        .with_state(state)
}

/// CORS layer for the configured origins; `*` allows any origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16, cors: CorsLayer) -> std::io::Result<()> {
    let router = create_router(state).layer(cors);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache_stats = state.previews.cache().stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: cache_stats,
    })
}

/// Get the preview of a topic's first post
async fn get_preview(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<PreviewQuery>,
) -> Response {
    let slug = params.slug.as_deref().unwrap_or_default();

    match state.previews.preview(&id, slug).await {
        Ok((result, from_cache)) => {
            let cache_header = if from_cache { "HIT" } else { "MISS" };
            ([("X-Cache", cache_header)], Json(result)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
