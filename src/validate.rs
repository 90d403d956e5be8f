//! Structural validation of candidate questions. The four-option shape and
//! answer-key range are already guaranteed by the types in `domain`; what
//! remains are the content checks: nothing empty, question text long enough
//! to be a real question.

use crate::domain::Question;
use crate::error::Rejection;

const MIN_QUESTION_CHARS: usize = 10;

/// Accept or reject one candidate. Rejected candidates are discarded by the
/// caller; the reason is kept for aggregation.
pub fn validate_question(q: &Question) -> Result<(), Rejection> {
  if q.text.trim().is_empty() {
    return Err(Rejection::EmptyQuestion);
  }
  if q.text.chars().count() < MIN_QUESTION_CHARS {
    return Err(Rejection::QuestionTooShort);
  }
  if q.options.iter().any(|(_, text)| text.trim().is_empty()) {
    return Err(Rejection::EmptyOption);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{AnswerKey, Options};

  fn sample() -> Question {
    Question {
      text: "What is photosynthesis?".into(),
      options: Options {
        a: "A light-driven process.".into(),
        b: "A kind of respiration.".into(),
        c: "A cell membrane.".into(),
        d: "A mineral nutrient.".into(),
      },
      answer: AnswerKey::A,
      explanation: "The correct answer is A.".into(),
    }
  }

  #[test]
  fn well_formed_question_passes() {
    assert!(validate_question(&sample()).is_ok());
  }

  #[test]
  fn short_question_text_is_rejected() {
    let mut q = sample();
    q.text = "What is?".into();
    assert_eq!(validate_question(&q), Err(Rejection::QuestionTooShort));
  }

  #[test]
  fn empty_question_text_is_rejected() {
    let mut q = sample();
    q.text = "   ".into();
    assert_eq!(validate_question(&q), Err(Rejection::EmptyQuestion));
  }

  #[test]
  fn blank_option_is_rejected() {
    let mut q = sample();
    q.options.c = String::new();
    assert_eq!(validate_question(&q), Err(Rejection::EmptyOption));
  }
}
