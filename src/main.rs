// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::env;

use ghost_trace::{start_server, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; the environment always wins
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // Fail fast: a missing credential halts startup before anything binds
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Starting Ghost-Trace (model: {}, service: {})",
        config.model,
        config.api_base
    );

    start_server(config).await
}
