// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment-driven configuration, validated once at startup

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default Gemini model for forensic reconstruction
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default API base for the Gemini REST endpoint
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set. Add it to the environment or a .env file before starting the server")]
    MissingApiKey,

    #[error("API_PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Process configuration, populated from the environment exactly once.
///
/// `GEMINI_API_KEY` is the only required variable; its absence is a fatal
/// startup error. Everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the external generation service
    pub api_key: String,
    /// Model identifier, e.g. "gemini-1.5-flash"
    pub model: String,
    /// Base URL of the generation service (overridable for tests)
    pub api_base: String,
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Callers are expected to have loaded `.env` (via `dotenv`) beforehand
    /// if they want file-based settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = match env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Err(ConfigError::MissingApiKey),
        };

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_base = env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let port_raw = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
        let port: u16 = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidPort(port_raw))?;

        Ok(Self {
            api_key,
            model,
            api_base,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], port)),
        })
    }
}
