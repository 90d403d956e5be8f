//! Application state: configuration, the content source, the file-backed
//! question cache, and the engine that ties them together.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument};

use crate::cache::FileCache;
use crate::config::load_config_from_env;
use crate::engine::QuizEngine;
use crate::wiki::{ContentSource, SyntheticSource, WikiClient};

pub struct AppState {
  pub engine: QuizEngine,
}

impl AppState {
  /// Build state from env: load config, construct the content source and
  /// cache, assemble the engine.
  #[instrument(level = "info", skip_all)]
  pub fn from_env() -> Arc<Self> {
    let cfg = load_config_from_env();

    let source: Box<dyn ContentSource> =
      match WikiClient::new(cfg.wiki_base_url.clone(), Duration::from_secs(cfg.fetch_timeout_secs)) {
        Some(client) => {
          info!(target: "quizforge_backend", base_url = %client.base_url(),
                timeout_secs = cfg.fetch_timeout_secs, "Wikipedia content source enabled");
          Box::new(client)
        }
        None => {
          error!(target: "quizforge_backend", "HTTP client construction failed; serving synthetic content only");
          Box::new(SyntheticSource)
        }
      };

    info!(target: "quizgen", cache_dir = %cfg.cache_dir, max_attempts = cfg.max_attempts,
          seed = ?cfg.seed, "Question cache and generation settings ready");
    let cache = Box::new(FileCache::new(cfg.cache_dir.clone()));

    Arc::new(Self { engine: QuizEngine::new(source, cache, &cfg) })
  }
}
