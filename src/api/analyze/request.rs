// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze request type

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to run forensic reconstruction on a session's evidence image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Session holding the uploaded evidence
    pub session_id: Uuid,
}
