//! Domain models used by the backend: difficulty tiers, answer keys, the
//! fixed four-option set, and the question record that flows through
//! generation, caching, and scoring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Difficulty tier requested by the caller. Selects the template pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Beginner,
  Intermediate,
  Advanced,
}

impl Default for Difficulty {
  fn default() -> Self { Difficulty::Intermediate }
}

impl Difficulty {
  /// Lenient parser. Strict validation belongs to the UI layer; anything
  /// unrecognized lands on the intermediate tier.
  pub fn parse_lossy(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "beginner" => Difficulty::Beginner,
      "advanced" => Difficulty::Advanced,
      _ => Difficulty::Intermediate,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Beginner => "beginner",
      Difficulty::Intermediate => "intermediate",
      Difficulty::Advanced => "advanced",
    }
  }
}

/// One of the four option letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
  A,
  B,
  C,
  D,
}

impl AnswerKey {
  pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

  /// Case-insensitive, whitespace-tolerant parse of a submitted letter.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_uppercase().as_str() {
      "A" => Some(AnswerKey::A),
      "B" => Some(AnswerKey::B),
      "C" => Some(AnswerKey::C),
      "D" => Some(AnswerKey::D),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      AnswerKey::A => "A",
      AnswerKey::B => "B",
      AnswerKey::C => "C",
      AnswerKey::D => "D",
    }
  }
}

/// The four option texts are fields, not map entries: a question can never
/// hold more or fewer than four options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
  #[serde(rename = "A")] pub a: String,
  #[serde(rename = "B")] pub b: String,
  #[serde(rename = "C")] pub c: String,
  #[serde(rename = "D")] pub d: String,
}

impl Options {
  pub fn get(&self, key: AnswerKey) -> &str {
    match key {
      AnswerKey::A => &self.a,
      AnswerKey::B => &self.b,
      AnswerKey::C => &self.c,
      AnswerKey::D => &self.d,
    }
  }

  pub fn set(&mut self, key: AnswerKey, text: String) {
    match key {
      AnswerKey::A => self.a = text,
      AnswerKey::B => self.b = text,
      AnswerKey::C => self.c = text,
      AnswerKey::D => self.d = text,
    }
  }

  /// Options in letter order, paired with their keys.
  pub fn iter(&self) -> impl Iterator<Item = (AnswerKey, &str)> {
    AnswerKey::ALL.iter().map(move |k| (*k, self.get(*k)))
  }
}

/// A validated multiple-choice question. Immutable once accepted into a
/// result set; this is also the unit stored in the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
  pub text: String,
  pub options: Options,
  pub answer: AnswerKey,
  pub explanation: String,
}

/// Immutable input describing one generation request.
#[derive(Clone, Debug, Deserialize)]
pub struct QuizRequest {
  pub subject: String,
  pub topic: String,
  pub difficulty: Difficulty,
  pub count: usize,
}

/// User submission: 1-based question index to submitted letter. May be
/// sparse and may contain letters outside A-D.
pub type AnswerMap = BTreeMap<usize, String>;

/// Result of scoring one submission. Derived, never persisted here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
  pub correct: usize,
  pub total: usize,
}
