// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP surface: router assembly, shared state, and server startup

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::analyze::analyze_handler;
use super::errors::ApiError;
use super::evidence::{session_handler, upload_evidence_handler};
use crate::config::Config;
use crate::gemini::GeminiClient;
use crate::session::SessionStore;

/// Single-page UI served at `/`
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared per-process state. Sessions are isolated inside the store; the
/// client and config are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini: Arc<GeminiClient>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gemini = GeminiClient::new(&config.api_key, &config.model, &config.api_base);
        Self {
            config: Arc::new(config),
            gemini: Arc::new(gemini),
            sessions: Arc::new(SessionStore::new()),
        }
    }

    /// State wired to an unreachable endpoint, for handler tests that never
    /// hit the external service.
    pub fn new_for_test() -> Self {
        Self::new(Config {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_base: "http://127.0.0.1:59999".to_string(),
            listen_addr: ([127, 0, 0, 1], 0).into(),
        })
    }
}

/// Build the application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/v1/evidence", post(upload_evidence_handler))
        .route("/v1/session/:id", get(session_handler))
        .route("/v1/analyze", post(analyze_handler))
        // Allow full-size evidence plus multipart framing overhead
        .layer(DefaultBodyLimit::max(crate::evidence::MAX_EVIDENCE_SIZE + 64 * 1024))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is terminated.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr = config.listen_addr;
    let state = AppState::new(config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Ghost-Trace listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler() -> impl IntoResponse {
    axum::response::Json(serde_json::json!({ "status": "ok" }))
}

// Error response wrapper
pub struct ApiErrorResponse(pub ApiError);

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let error_response = self.0.to_response();

        (status, axum::response::Json(error_response)).into_response()
    }
}
