// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze response types

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gemini::EnhancedImage;

/// Response from one forensic reconstruction run.
///
/// `enhanced` is `null` when the model returned no usable inline image; the
/// text report is always present (a run without one fails instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Session the run belongs to
    pub session_id: Uuid,
    /// Text report from the model (plate, confidence, justification)
    pub report: String,
    /// Enhanced reconstruction, if the model returned one
    pub enhanced: Option<EnhancedImagePayload>,
    /// Model used for the run
    pub model: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Enhanced image as it travels to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedImagePayload {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type reported by the service
    pub mime_type: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl From<&EnhancedImage> for EnhancedImagePayload {
    fn from(image: &EnhancedImage) -> Self {
        Self {
            data: STANDARD.encode(&image.bytes),
            mime_type: image.mime_type.clone(),
            width: image.width,
            height: image.height,
        }
    }
}
