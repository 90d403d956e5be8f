//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable so the UI layer can evolve independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerMap, Difficulty, Question, QuizRequest};

/// Default question count when the caller does not specify one.
const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct GenerateIn {
  pub subject: String,
  pub topic: String,
  #[serde(default)]
  pub difficulty: Option<String>,
  #[serde(default)]
  pub count: Option<usize>,
}

impl GenerateIn {
  /// Normalize the wire form: lossy difficulty, count clamped to at least 1.
  pub fn into_request(self) -> QuizRequest {
    QuizRequest {
      subject: self.subject,
      topic: self.topic,
      difficulty: self
        .difficulty
        .as_deref()
        .map(Difficulty::parse_lossy)
        .unwrap_or_default(),
      count: self.count.unwrap_or(DEFAULT_COUNT).max(1),
    }
  }
}

#[derive(Serialize)]
pub struct QuizOut {
  pub questions: Vec<Question>,
}

/// The caller holds the question list between generation and scoring, so
/// scoring takes both back; there is no server-side quiz session.
#[derive(Deserialize)]
pub struct EvaluateIn {
  pub questions: Vec<Question>,
  pub answers: AnswerMap,
}

#[derive(Serialize)]
pub struct ScoreOut {
  pub correct: usize,
  pub total: usize,
}

#[derive(Deserialize)]
pub struct ParseIn {
  pub text: String,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn generate_in_normalizes_difficulty_and_count() {
    let body: GenerateIn =
      serde_json::from_str(r#"{"subject":"Math","topic":"Primes","difficulty":"expert","count":0}"#)
        .unwrap();
    let req = body.into_request();
    assert_eq!(req.difficulty, Difficulty::Intermediate);
    assert_eq!(req.count, 1);
  }

  #[test]
  fn generate_in_defaults_apply() {
    let body: GenerateIn = serde_json::from_str(r#"{"subject":"Math","topic":"Primes"}"#).unwrap();
    let req = body.into_request();
    assert_eq!(req.difficulty, Difficulty::Intermediate);
    assert_eq!(req.count, 5);
  }

  #[test]
  fn evaluate_in_accepts_numeric_string_keys() {
    let body: EvaluateIn =
      serde_json::from_str(r#"{"questions":[],"answers":{"1":"A","3":"d"}}"#).unwrap();
    assert_eq!(body.answers.len(), 2);
    assert_eq!(body.answers.get(&3).map(String::as_str), Some("d"));
  }
}
