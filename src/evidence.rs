// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence intake: validation and decoding of uploaded vehicle images

use image::ImageFormat;
use thiserror::Error;

/// Maximum upload size (10MB)
pub const MAX_EVIDENCE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("Uploaded file is empty")]
    EmptyData,

    #[error("Uploaded file is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported image format; only JPEG and PNG evidence is accepted")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),
}

/// One decoded evidence image.
///
/// The raw upload bytes are kept alongside the decoded metadata because the
/// original container is what gets forwarded to the external model. Exactly
/// one of these exists per session; a new upload replaces it.
#[derive(Debug, Clone)]
pub struct EvidenceImage {
    /// Original upload bytes (JPEG or PNG container)
    pub bytes: Vec<u8>,
    /// Detected container format
    pub format: ImageFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl EvidenceImage {
    /// MIME type of the stored container
    pub fn mime_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            _ => "image/jpeg",
        }
    }

    /// Extension string for display purposes
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "png",
            _ => "jpg",
        }
    }
}

/// Detect the evidence container format from magic bytes.
///
/// Only JPEG and PNG are accepted; anything else is rejected before the
/// external service is ever involved.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, EvidenceError> {
    if bytes.len() < 4 {
        return Err(EvidenceError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        _ => Err(EvidenceError::UnsupportedFormat),
    }
}

/// Validate and decode an uploaded evidence file.
///
/// On success the raster has been fully decoded once, proving the container
/// is well formed. Decode failures propagate as user-visible errors; no
/// partial or fallback image is produced.
pub fn decode_evidence(bytes: Vec<u8>) -> Result<EvidenceImage, EvidenceError> {
    if bytes.is_empty() {
        return Err(EvidenceError::EmptyData);
    }

    if bytes.len() > MAX_EVIDENCE_SIZE {
        return Err(EvidenceError::TooLarge(bytes.len(), MAX_EVIDENCE_SIZE));
    }

    let format = detect_format(&bytes)?;

    let img = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| EvidenceError::DecodeFailed(e.to_string()))?;

    Ok(EvidenceImage {
        width: img.width(),
        height: img.height(),
        format,
        bytes,
    })
}
