//! Evaluator: scores a submitted answer map against a generated question
//! list. Position indices are 1-based; comparison is case-insensitive and
//! whitespace-trimmed. Missing or unrecognized answers simply score zero.

use crate::domain::{AnswerKey, AnswerMap, Question, ScoreResult};

pub fn evaluate_quiz(questions: &[Question], answers: &AnswerMap) -> ScoreResult {
  let total = questions.len();
  if questions.is_empty() || answers.is_empty() {
    return ScoreResult { correct: 0, total };
  }

  let correct = questions
    .iter()
    .enumerate()
    .filter(|(i, q)| {
      answers
        .get(&(i + 1))
        .and_then(|submitted| AnswerKey::parse(submitted))
        .map_or(false, |key| key == q.answer)
    })
    .count();

  ScoreResult { correct, total }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{AnswerMap, Options};

  fn quiz() -> Vec<Question> {
    [AnswerKey::A, AnswerKey::C, AnswerKey::D]
      .into_iter()
      .enumerate()
      .map(|(i, answer)| Question {
        text: format!("Question number {} about something?", i + 1),
        options: Options {
          a: "first".into(),
          b: "second".into(),
          c: "third".into(),
          d: "fourth".into(),
        },
        answer,
        explanation: String::new(),
      })
      .collect()
  }

  #[test]
  fn empty_answers_score_zero() {
    let result = evaluate_quiz(&quiz(), &AnswerMap::new());
    assert_eq!(result, ScoreResult { correct: 0, total: 3 });
  }

  #[test]
  fn empty_questions_score_zero() {
    let mut answers = AnswerMap::new();
    answers.insert(1, "A".into());
    let result = evaluate_quiz(&[], &answers);
    assert_eq!(result, ScoreResult { correct: 0, total: 0 });
  }

  #[test]
  fn full_credit_round_trip() {
    let questions = quiz();
    let answers: AnswerMap = questions
      .iter()
      .enumerate()
      .map(|(i, q)| (i + 1, q.answer.as_str().to_string()))
      .collect();
    let result = evaluate_quiz(&questions, &answers);
    assert_eq!(result.correct, result.total);
  }

  #[test]
  fn comparison_is_case_insensitive_and_trimmed() {
    let mut answers = AnswerMap::new();
    answers.insert(1, " a ".into());
    answers.insert(2, "c".into());
    let result = evaluate_quiz(&quiz(), &answers);
    assert_eq!(result.correct, 2);
  }

  #[test]
  fn sparse_and_garbage_answers_never_panic() {
    let mut answers = AnswerMap::new();
    answers.insert(2, "X".into());
    answers.insert(3, "D".into());
    answers.insert(99, "A".into());
    let result = evaluate_quiz(&quiz(), &answers);
    assert_eq!(result.correct, 1);
  }
}
