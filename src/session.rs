// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session-scoped state: one evidence image and at most one result per
//! browser session. Nothing here persists or is shared across sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::evidence::EvidenceImage;
use crate::gemini::EnhancedImage;

/// Outcome of one completed analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub report: String,
    pub enhanced: Option<EnhancedImage>,
}

/// Observable phase of a session. `Running` is transient (the duration of
/// one analyze call) and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Loaded,
    Done,
}

/// Sessions the store keeps at most before evicting the oldest upload
pub const MAX_SESSIONS: usize = 1024;

#[derive(Debug, Clone)]
pub struct Session {
    pub evidence: EvidenceImage,
    pub result: Option<AnalysisResult>,
    /// Upload sequence number; lowest is evicted first when the store is full
    pub seq: u64,
}

impl Session {
    pub fn phase(&self) -> SessionPhase {
        if self.result.is_some() {
            SessionPhase::Done
        } else {
            SessionPhase::Loaded
        }
    }
}

/// In-process session map. Uploading evidence for an existing id replaces the
/// image and discards the previous result. The map is bounded: once
/// `capacity` sessions exist, inserting a new one evicts the session with the
/// oldest upload, so a long-running process cannot accumulate images forever.
pub struct SessionStore {
    capacity: usize,
    next_seq: AtomicU64,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::bounded(MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding at most `capacity` sessions
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity,
            next_seq: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store evidence under `id` (or a fresh id), dropping any prior image
    /// and result for that session. Returns the session id.
    pub async fn put_evidence(&self, id: Option<Uuid>, evidence: EvidenceImage) -> Uuid {
        let id = id.unwrap_or_else(Uuid::new_v4);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&id) && sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.seq)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
            }
        }

        sessions.insert(
            id,
            Session {
                evidence,
                result: None,
                seq,
            },
        );
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Record the result of a completed run. Returns false if the session
    /// disappeared (e.g. replaced) while the run was in flight.
    pub async fn set_result(&self, id: &Uuid, result: AnalysisResult) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) => {
                session.result = Some(result);
                true
            }
            None => false,
        }
    }
}
