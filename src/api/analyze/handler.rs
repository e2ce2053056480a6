// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use super::request::AnalyzeRequest;
use super::response::{AnalyzeResponse, EnhancedImagePayload};
use crate::api::errors::ApiError;
use crate::api::http_server::{ApiErrorResponse, AppState};
use crate::gemini::{extract_enhanced_image, extract_report, GeminiError};
use crate::session::AnalysisResult;

/// POST /v1/analyze - Run one forensic reconstruction for a session
///
/// Pipeline:
/// 1. Look up the session's evidence image (404 if absent)
/// 2. Send prompt + image to the generation service, blocking until it
///    responds (one round trip, no retry)
/// 3. Extract the text report (strict: absence fails the run)
/// 4. Extract the enhanced image (best effort: absence degrades to None)
/// 5. Store the result on the session and return it
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiErrorResponse> {
    let session_id = request.session_id;

    let session = state.sessions.get(&session_id).await.ok_or_else(|| {
        warn!("Analyze request for unknown session {}", session_id);
        ApiError::SessionNotFound(session_id.to_string())
    })?;

    debug!(
        "Starting reconstruction run for session {} ({}x{} {})",
        session_id,
        session.evidence.width,
        session.evidence.height,
        session.evidence.extension()
    );
    let start = std::time::Instant::now();

    let response = state
        .gemini
        .generate(&session.evidence)
        .await
        .map_err(|e| {
            warn!("Reconstruction run failed for session {}: {}", session_id, e);
            ApiError::UpstreamError(e.to_string())
        })?;

    let report = extract_report(&response).map_err(|e| match e {
        GeminiError::MissingReport => {
            warn!("Response for session {} carried no analysis text", session_id);
            ApiError::UpstreamError(e.to_string())
        }
        other => ApiError::UpstreamError(other.to_string()),
    })?;

    let enhanced = extract_enhanced_image(&response);
    if enhanced.is_none() {
        debug!("No usable enhanced image in response for session {}", session_id);
    }

    let payload = enhanced.as_ref().map(EnhancedImagePayload::from);

    state
        .sessions
        .set_result(
            &session_id,
            AnalysisResult {
                report: report.clone(),
                enhanced,
            },
        )
        .await;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    info!(
        "Reconstruction run complete for session {} in {}ms (enhanced image: {})",
        session_id,
        processing_time_ms,
        payload.is_some()
    );

    Ok(Json(AnalyzeResponse {
        session_id,
        report,
        enhanced: payload,
        model: state.gemini.model().to_string(),
        processing_time_ms,
    }))
}
