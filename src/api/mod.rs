// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analyze;
pub mod errors;
pub mod evidence;
pub mod http_server;

pub use analyze::{analyze_handler, AnalyzeRequest, AnalyzeResponse, EnhancedImagePayload};
pub use errors::{ApiError, ErrorResponse};
pub use evidence::{session_handler, upload_evidence_handler, EvidenceResponse, SessionResponse};
pub use http_server::{create_app, start_server, AppState};
