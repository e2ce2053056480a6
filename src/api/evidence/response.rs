// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence and session response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::analyze::EnhancedImagePayload;
use crate::session::{Session, SessionPhase};

/// Response to a successful evidence upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceResponse {
    /// Session holding the image (reuse it for the analyze call)
    pub session_id: Uuid,
    /// Width of the decoded image in pixels
    pub width: u32,
    /// Height of the decoded image in pixels
    pub height: u32,
    /// Container format ("jpg" or "png")
    pub format: String,
    /// Upload size in bytes
    pub size_bytes: usize,
}

/// Snapshot of a session's state for the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub width: u32,
    pub height: u32,
    pub format: String,
    /// Present only once a run has completed
    pub result: Option<SessionResultPayload>,
}

/// Stored result of the last completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResultPayload {
    pub report: String,
    pub enhanced: Option<EnhancedImagePayload>,
}

impl SessionResponse {
    pub fn from_session(id: Uuid, session: &Session) -> Self {
        Self {
            session_id: id,
            phase: session.phase(),
            width: session.evidence.width,
            height: session.evidence.height,
            format: session.evidence.extension().to_string(),
            result: session.result.as_ref().map(|r| SessionResultPayload {
                report: r.report.clone(),
                enhanced: r.enhanced.as_ref().map(EnhancedImagePayload::from),
            }),
        }
    }
}
