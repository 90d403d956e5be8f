//! Parser for externally authored quiz text in the common
//! `Q1. ... / A. ... / Answer: B` block format. Blocks that do not form a
//! complete, valid question are dropped rather than failing the whole
//! document.

use crate::domain::{AnswerKey, Options, Question};
use crate::validate::validate_question;

#[derive(Default)]
struct Draft {
  text: String,
  options: [Option<String>; 4],
  answer: Option<AnswerKey>,
}

impl Draft {
  fn started(&self) -> bool {
    !self.text.is_empty()
  }

  fn finish(self) -> Option<Question> {
    let [a, b, c, d] = self.options;
    let question = Question {
      text: self.text,
      options: Options { a: a?, b: b?, c: c?, d: d? },
      answer: self.answer?,
      explanation: String::new(),
    };
    validate_question(&question).ok()?;
    Some(question)
  }
}

/// Parse quiz text into validated questions.
pub fn parse_quiz_text(text: &str) -> Vec<Question> {
  let mut questions = Vec::new();
  let mut current = Draft::default();

  for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
    if line.starts_with('Q') || line.starts_with("Question") {
      let prev = std::mem::take(&mut current);
      if prev.started() {
        questions.extend(prev.finish());
      }
      // Drop the "Q1." / "Question 2." prefix, keep everything after the
      // first period.
      current.text = line
        .splitn(2, '.')
        .last()
        .unwrap_or(line)
        .trim()
        .to_string();
    } else if let Some((letter, option)) = split_option_line(line) {
      current.options[letter as usize] = Some(option.to_string());
    } else if let Some(rest) = answer_value(line) {
      current.answer = AnswerKey::parse(rest);
    }
  }

  if current.started() {
    questions.extend(current.finish());
  }

  questions
}

fn split_option_line(line: &str) -> Option<(AnswerKey, &str)> {
  let (prefix, rest) = line.split_once('.')?;
  let key = AnswerKey::parse(prefix)?;
  Some((key, rest.trim()))
}

fn answer_value(line: &str) -> Option<&str> {
  let needle = b"answer:";
  let pos = line
    .as_bytes()
    .windows(needle.len())
    .position(|w| w.eq_ignore_ascii_case(needle))?;
  Some(line[pos + needle.len()..].trim())
}

#[cfg(test)]
mod tests {
  use super::*;

  const TEXT: &str = "\
Q1. Which gas do plants absorb during photosynthesis?
A. Oxygen
B. Carbon dioxide
C. Nitrogen
D. Hydrogen
Answer: B

Q2. Which organelle produces most cellular energy?
A. Nucleus
B. Ribosome
C. Mitochondrion
D. Vacuole
Answer: C
";

  #[test]
  fn parses_well_formed_blocks() {
    let questions = parse_quiz_text(TEXT);
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].answer, AnswerKey::B);
    assert_eq!(questions[0].options.b, "Carbon dioxide");
    assert!(questions[1].text.starts_with("Which organelle"));
  }

  #[test]
  fn incomplete_blocks_are_dropped() {
    let text = "\
Q1. Which planet is largest in the solar system?
A. Earth
B. Jupiter
Answer: B

Q2. Which gas do plants absorb during photosynthesis?
A. Oxygen
B. Carbon dioxide
C. Nitrogen
D. Hydrogen
Answer: B
";
    let questions = parse_quiz_text(text);
    assert_eq!(questions.len(), 1);
    assert!(questions[0].text.contains("photosynthesis"));
  }

  #[test]
  fn invalid_answer_letter_drops_the_block() {
    let text = TEXT.replace("Answer: B", "Answer: E");
    let questions = parse_quiz_text(&text);
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].answer, AnswerKey::C);
  }

  #[test]
  fn question_prefix_variants_are_accepted() {
    let text = TEXT.replace("Q1.", "Question 1.");
    assert_eq!(parse_quiz_text(&text).len(), 2);
  }

  #[test]
  fn empty_input_parses_to_nothing() {
    assert!(parse_quiz_text("").is_empty());
  }
}
