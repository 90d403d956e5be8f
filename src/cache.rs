//! Cache store for generated question sets, keyed by normalized
//! subject/topic/difficulty. Pluggable backend trait with a JSON-file
//! implementation for the server and an in-memory one for tests and
//! embedded use.
//!
//! Entries never expire by time; an entry is only reused when it holds at
//! least as many questions as the request asks for, and a later write for
//! the same key fully replaces the prior value.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Difficulty, Question};
use crate::error::CacheError;

/// Normalized cache key: `lowercase(subject)_lowercase(topic)_lowercase(difficulty)`
/// with spaces replaced by underscores.
pub fn cache_key(subject: &str, topic: &str, difficulty: Difficulty) -> String {
  format!("{}_{}_{}", subject, topic, difficulty.as_str())
    .to_lowercase()
    .replace(' ', "_")
}

/// Pluggable question-set cache. A failed read is reported as a miss; a
/// failed write surfaces an error for the caller to log and ignore.
pub trait QuizCache: Send + Sync {
  fn get(&self, key: &str) -> Option<Vec<Question>>;
  fn put(&self, key: &str, questions: &[Question]) -> Result<(), CacheError>;
}

/// One JSON file per key under a cache directory.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so concurrent writers can race (last writer wins) without ever
/// leaving a partially-written entry.
pub struct FileCache {
  dir: PathBuf,
}

impl FileCache {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  fn entry_path(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{}.json", key))
  }
}

impl QuizCache for FileCache {
  fn get(&self, key: &str) -> Option<Vec<Question>> {
    let path = self.entry_path(key);
    let raw = match fs::read_to_string(&path) {
      Ok(raw) => raw,
      Err(_) => return None,
    };
    match serde_json::from_str::<Vec<Question>>(&raw) {
      Ok(questions) => Some(questions),
      Err(e) => {
        // Unreadable entries are treated as absent; the next successful
        // generation overwrites them.
        debug!(target: "quiz_cache", %key, error = %e, "Discarding undecodable cache entry");
        None
      }
    }
  }

  fn put(&self, key: &str, questions: &[Question]) -> Result<(), CacheError> {
    fs::create_dir_all(&self.dir)?;
    let tmp = self.dir.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));
    let encoded = serde_json::to_string(questions)?;
    fs::write(&tmp, encoded)?;
    if let Err(e) = fs::rename(&tmp, self.entry_path(key)) {
      let _ = fs::remove_file(&tmp);
      return Err(e.into());
    }
    Ok(())
  }
}

/// HashMap-backed cache for tests and library embedding.
#[derive(Default)]
pub struct MemoryCache {
  entries: Mutex<HashMap<String, Vec<Question>>>,
}

impl MemoryCache {
  pub fn new() -> Self {
    Self::default()
  }
}

impl QuizCache for MemoryCache {
  fn get(&self, key: &str) -> Option<Vec<Question>> {
    match self.entries.lock() {
      Ok(map) => map.get(key).cloned(),
      Err(e) => {
        warn!(target: "quiz_cache", %key, error = %e, "Memory cache lock poisoned; treating as miss");
        None
      }
    }
  }

  fn put(&self, key: &str, questions: &[Question]) -> Result<(), CacheError> {
    if let Ok(mut map) = self.entries.lock() {
      map.insert(key.to_string(), questions.to_vec());
    }
    Ok(())
  }
}
