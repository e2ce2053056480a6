// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Defensive extraction of the text report and the optional enhanced image
//! from a `generateContent` response.
//!
//! The two paths deliberately differ: a missing text report fails the run,
//! while anything wrong with the inline image data degrades to "no enhanced
//! image" without an error.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use super::client::GeminiError;
use super::types::GenerateContentResponse;

/// An enhanced reconstruction returned inline by the model.
#[derive(Debug, Clone)]
pub struct EnhancedImage {
    /// Decoded binary payload (validated as a decodable raster)
    pub bytes: Vec<u8>,
    /// MIME type reported by the service
    pub mime_type: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Extract the text report from the first candidate. Strict: a response with
/// no candidate, no content, or no non-empty text part fails the run.
pub fn extract_report(response: &GenerateContentResponse) -> Result<String, GeminiError> {
    let content = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .ok_or(GeminiError::MissingReport)?;

    let report = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n");

    if report.trim().is_empty() {
        return Err(GeminiError::MissingReport);
    }

    Ok(report)
}

/// Extract an enhanced image from the first candidate, if any part carries
/// decodable inline image data. Best effort: never errors, returns `None` on
/// any absence or decode failure. When several parts carry valid inline data
/// the last one wins, matching the original tool's iteration order.
pub fn extract_enhanced_image(response: &GenerateContentResponse) -> Option<EnhancedImage> {
    let content = response.candidates.first()?.content.as_ref()?;

    let mut enhanced = None;
    for part in &content.parts {
        let Some(inline) = part.inline_data.as_ref() else {
            continue;
        };

        let bytes = match STANDARD.decode(&inline.data) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping inline part with invalid base64: {}", e);
                continue;
            }
        };

        match image::load_from_memory(&bytes) {
            Ok(img) => {
                enhanced = Some(EnhancedImage {
                    width: img.width(),
                    height: img.height(),
                    mime_type: inline.mime_type.clone(),
                    bytes,
                });
            }
            Err(e) => {
                debug!("Skipping inline part that is not a decodable image: {}", e);
            }
        }
    }

    enhanced
}
