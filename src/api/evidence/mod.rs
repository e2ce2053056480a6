// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Evidence endpoints: multipart upload and session inspection

pub mod handler;
pub mod response;

pub use handler::{session_handler, upload_evidence_handler};
pub use response::{EvidenceResponse, SessionResponse, SessionResultPayload};
