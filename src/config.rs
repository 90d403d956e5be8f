//! Service configuration: optional TOML file plus environment overrides.
//! Every field has a working default so the server runs with no config at
//! all; parse or read failures are logged and fall back to defaults.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
  /// MediaWiki API root, e.g. "https://en.wikipedia.org/w".
  pub wiki_base_url: String,
  /// Per-request timeout for content fetches. A timed-out fetch is treated
  /// like any other fetch failure.
  pub fetch_timeout_secs: u64,
  /// Directory for the file-backed question cache.
  pub cache_dir: String,
  /// Generation attempts before falling back to generic questions.
  pub max_attempts: usize,
  /// Fixed RNG seed for reproducible quizzes; absent means entropy-seeded.
  pub seed: Option<u64>,
}

impl Default for QuizConfig {
  fn default() -> Self {
    Self {
      wiki_base_url: "https://en.wikipedia.org/w".into(),
      fetch_timeout_secs: 15,
      cache_dir: "quiz_cache".into(),
      max_attempts: 3,
      seed: None,
    }
  }
}

/// Load config: `QUIZ_CONFIG_PATH` TOML if present, then env overrides
/// (`WIKI_BASE_URL`, `QUIZ_CACHE_DIR`, `QUIZ_SEED`).
pub fn load_config_from_env() -> QuizConfig {
  let mut cfg = match std::env::var("QUIZ_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<QuizConfig>(&s) {
        Ok(cfg) => {
          info!(target: "quizforge_backend", %path, "Loaded quiz config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "quizforge_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
          QuizConfig::default()
        }
      },
      Err(e) => {
        error!(target: "quizforge_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
        QuizConfig::default()
      }
    },
    Err(_) => QuizConfig::default(),
  };

  if let Ok(url) = std::env::var("WIKI_BASE_URL") {
    cfg.wiki_base_url = url;
  }
  if let Ok(dir) = std::env::var("QUIZ_CACHE_DIR") {
    cfg.cache_dir = dir;
  }
  if let Ok(seed) = std::env::var("QUIZ_SEED") {
    match seed.parse::<u64>() {
      Ok(seed) => cfg.seed = Some(seed),
      Err(e) => error!(target: "quizforge_backend", %seed, error = %e, "Ignoring unparsable QUIZ_SEED"),
    }
  }

  cfg
}
