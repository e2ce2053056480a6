// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence upload and session inspection handlers

use axum::extract::{Multipart, Path, State};
use axum::Json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::response::{EvidenceResponse, SessionResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::{ApiErrorResponse, AppState};
use crate::evidence::{decode_evidence, EvidenceError};

/// Content types the upload gate lets through before magic-byte detection
const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// POST /v1/evidence - Upload one evidence image (multipart)
///
/// Expects a `file` part carrying a JPEG or PNG, and optionally a
/// `sessionId` part to replace the image of an existing session. A replaced
/// session loses its previous result.
pub async fn upload_evidence_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvidenceResponse>, ApiErrorResponse> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut session_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                if let Some(content_type) = field.content_type().map(str::to_string) {
                    if !ACCEPTED_CONTENT_TYPES.contains(&content_type.as_str()) {
                        warn!("Rejected upload with content type {}", content_type);
                        return Err(ApiError::UnsupportedMediaType(format!(
                            "'{}' is not accepted; upload a JPEG or PNG image",
                            content_type
                        ))
                        .into());
                    }
                }
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("Failed to read upload: {}", e))
                })?;
                file_bytes = Some(bytes.to_vec());
            }
            Some("sessionId") => {
                let raw = field.text().await.map_err(|e| {
                    ApiError::InvalidRequest(format!("Failed to read sessionId: {}", e))
                })?;
                let id = raw.parse::<Uuid>().map_err(|_| ApiError::ValidationError {
                    field: "sessionId".to_string(),
                    message: format!("'{}' is not a valid session id", raw),
                })?;
                session_id = Some(id);
            }
            // Unknown parts are ignored
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::ValidationError {
        field: "file".to_string(),
        message: "file is required".to_string(),
    })?;

    let size_bytes = bytes.len();
    let evidence = decode_evidence(bytes).map_err(|e| {
        warn!("Evidence rejected: {}", e);
        match e {
            EvidenceError::UnsupportedFormat => ApiError::UnsupportedMediaType(e.to_string()),
            EvidenceError::EmptyData | EvidenceError::TooLarge(_, _) => ApiError::ValidationError {
                field: "file".to_string(),
                message: e.to_string(),
            },
            EvidenceError::DecodeFailed(_) => ApiError::InvalidRequest(e.to_string()),
        }
    })?;

    let width = evidence.width;
    let height = evidence.height;
    let format = evidence.extension().to_string();

    let replacing = session_id.is_some();
    let id = state.sessions.put_evidence(session_id, evidence).await;
    if replacing {
        debug!("Session {} evidence replaced, previous result discarded", id);
    }
    info!(
        "Evidence loaded for session {}: {}x{} {} ({} bytes)",
        id, width, height, format, size_bytes
    );

    Ok(Json(EvidenceResponse {
        session_id: id,
        width,
        height,
        format,
        size_bytes,
    }))
}

/// GET /v1/session/:id - Current phase and last result of a session
pub async fn session_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiErrorResponse> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;

    Ok(Json(SessionResponse::from_session(id, &session)))
}
