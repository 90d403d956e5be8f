//! Orchestrator: fronts the pipeline with the question cache, drives the
//! fetch → extract → synthesize → validate loop with escalating query
//! breadth, and fills any remaining shortfall from the generic pool.
//!
//! There is no fatal path here: `generate` always returns questions, and
//! only returns fewer than requested when every fetch produced nothing and
//! the request exceeds the generic pool.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, warn};

use crate::cache::{cache_key, QuizCache};
use crate::config::QuizConfig;
use crate::domain::{Question, QuizRequest};
use crate::error::Rejection;
use crate::fallback::generic_questions;
use crate::synth::synthesize_batch;
use crate::wiki::ContentSource;

pub struct QuizEngine {
  source: Box<dyn ContentSource>,
  cache: Box<dyn QuizCache>,
  max_attempts: usize,
  seed: Option<u64>,
}

impl QuizEngine {
  pub fn new(source: Box<dyn ContentSource>, cache: Box<dyn QuizCache>, cfg: &QuizConfig) -> Self {
    Self {
      source,
      cache,
      max_attempts: cfg.max_attempts.max(1),
      seed: cfg.seed,
    }
  }

  fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    }
  }

  /// Generate a quiz for one request. The cache read is the sole fast
  /// path; everything after it is the retry/escalation loop.
  #[instrument(level = "info", skip(self, req),
               fields(subject = %req.subject, topic = %req.topic,
                      difficulty = req.difficulty.as_str(), count = req.count))]
  pub async fn generate(&self, req: &QuizRequest) -> Vec<Question> {
    let count = req.count.max(1);
    let key = cache_key(&req.subject, &req.topic, req.difficulty);

    if let Some(cached) = self.cache.get(&key) {
      if cached.len() >= count {
        info!(target: "quizgen", %key, stored = cached.len(), "Cache hit; serving stored questions");
        return cached.into_iter().take(count).collect();
      }
      info!(target: "quizgen", %key, stored = cached.len(), "Cached entry smaller than request; regenerating");
    }

    let mut rng = self.rng();
    let mut accepted: Vec<Question> = Vec::new();
    let mut rejection_counts: HashMap<Rejection, usize> = HashMap::new();

    let mut attempt = 0;
    while accepted.len() < count && attempt < self.max_attempts {
      let corpus = self.source.fetch(&req.subject, &req.topic, attempt, false).await;
      debug!(target: "quizgen", attempt, preview = %crate::util::trunc_for_log(&corpus, 80), "Corpus fetched");
      let batch = synthesize_batch(&corpus, &req.subject, &req.topic, req.difficulty, count, &mut rng);
      for r in &batch.rejections {
        *rejection_counts.entry(*r).or_default() += 1;
      }
      let added = merge_unique(&mut accepted, batch.questions);
      info!(target: "quizgen", attempt, added, have = accepted.len(), "Attempt merged");

      attempt += 1;

      // Extra escalation layered on the normal schedule: one broadened
      // fetch before the final attempt.
      if accepted.len() < count && attempt == self.max_attempts - 1 {
        let corpus = self.source.fetch(&req.subject, &req.topic, 0, true).await;
        let batch = synthesize_batch(&corpus, &req.subject, &req.topic, req.difficulty, count, &mut rng);
        for r in &batch.rejections {
          *rejection_counts.entry(*r).or_default() += 1;
        }
        let added = merge_unique(&mut accepted, batch.questions);
        info!(target: "quizgen", added, have = accepted.len(), "Broadened fetch merged");
      }
    }

    if !rejection_counts.is_empty() {
      let summary: Vec<String> = rejection_counts
        .iter()
        .map(|(r, n)| format!("{}x {}", n, r))
        .collect();
      info!(target: "quizgen", rejected = summary.join(", "), "Candidates discarded during synthesis");
    }

    let shortfall = count.saturating_sub(accepted.len());
    if shortfall > 0 {
      let filler = generic_questions(&req.subject, &req.topic, shortfall, &mut rng);
      info!(target: "quizgen", shortfall, filled = filler.len(), "Filling shortfall with generic questions");
      // Fallback text is distinct from content questions by construction;
      // no dedup pass needed.
      accepted.extend(filler);
    }

    accepted.truncate(count);
    if accepted.len() < count {
      warn!(target: "quizgen", have = accepted.len(), count, "Generation and fallback both exhausted; returning short list");
    }

    if !accepted.is_empty() {
      if let Err(e) = self.cache.put(&key, &accepted) {
        warn!(target: "quizgen", %key, error = %e, "Cache write failed; continuing without cache");
      }
    }

    accepted
  }
}

/// Merge questions whose text is not already present. Returns how many
/// were added.
fn merge_unique(accepted: &mut Vec<Question>, incoming: Vec<Question>) -> usize {
  let mut added = 0;
  for q in incoming {
    if !accepted.iter().any(|existing| existing.text == q.text) {
      accepted.push(q);
      added += 1;
    }
  }
  added
}
