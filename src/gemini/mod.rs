// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client, wire types, and response extraction for the Gemini
//! `generateContent` multimodal API

pub mod client;
pub mod extract;
pub mod types;

pub use client::{GeminiClient, GeminiError, RECONSTRUCTION_PROMPT};
pub use extract::{extract_enhanced_image, extract_report, EnhancedImage};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part,
};
