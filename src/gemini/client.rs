// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for the Gemini multimodal generation service

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use super::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};
use crate::evidence::EvidenceImage;

/// Fixed instruction sent with every evidence image.
pub const RECONSTRUCTION_PROMPT: &str = "This is a blurry image from a hit-and-run scene. \
Act as a Forensic Reconstruction Agent. \
1. Generate a NEW high-resolution image where the license plate is perfectly clear. \
2. Provide the license plate number, confidence score, and 2-line justification.";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Failed to reach generation service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Response contained no analysis text")]
    MissingReport,
}

/// Client for `generateContent` calls against a Gemini-compatible endpoint.
///
/// One round trip per run: no retry, no backoff, no rate limiting. A hung or
/// failed call surfaces directly to the caller.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str, api_base: &str) -> Self {
        let api_base = api_base.trim_end_matches('/').to_string();
        info!("Gemini client configured: base={}, model={}", api_base, model);

        Self {
            client: Client::new(),
            api_base,
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Model name this client targets
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the multimodal payload for one evidence image.
    pub fn build_request(&self, evidence: &EvidenceImage) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(RECONSTRUCTION_PROMPT),
                    Part::inline_data(evidence.mime_type(), STANDARD.encode(&evidence.bytes)),
                ],
            }],
        }
    }

    /// Send one evidence image for forensic reconstruction and wait for the
    /// structured response.
    pub async fn generate(
        &self,
        evidence: &EvidenceImage,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let request = self.build_request(evidence);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        debug!(
            "Sending reconstruction request: {}x{} {} ({} bytes)",
            evidence.width,
            evidence.height,
            evidence.extension(),
            evidence.bytes.len()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
