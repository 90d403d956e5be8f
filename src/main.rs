//! Quizforge · Quiz Generation Backend
//!
//! - Axum HTTP API over the template-based quiz pipeline
//! - Wikipedia-backed content retrieval with synthetic fallback
//! - File-backed question cache
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   QUIZ_CONFIG_PATH : path to TOML config (source URL, timeouts, cache dir)
//!   WIKI_BASE_URL    : MediaWiki API root override
//!   QUIZ_CACHE_DIR   : cache directory override
//!   QUIZ_SEED        : fixed RNG seed for reproducible quizzes
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod clean;
mod extract;
mod synth;
mod validate;
mod fallback;
mod cache;
mod wiki;
mod engine;
mod score;
mod parse;
mod protocol;
mod state;
mod routes;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (config, content source, cache, engine).
  let state = AppState::from_env();

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizforge_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
