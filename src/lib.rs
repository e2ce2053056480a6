// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod evidence;
pub mod gemini;
pub mod session;

pub use api::{create_app, start_server, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use evidence::{decode_evidence, EvidenceError, EvidenceImage};
pub use gemini::{
    extract_enhanced_image, extract_report, EnhancedImage, GeminiClient, GeminiError,
};
pub use session::{AnalysisResult, Session, SessionPhase, SessionStore};
