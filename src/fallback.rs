//! Generic fallback generator: difficulty-agnostic, content-independent
//! questions used only to fill a shortfall after the retry loop. The pool
//! is hand-authored and pre-satisfies the validator by construction.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{AnswerKey, Options, Question};
use crate::util::fill_template;

struct GenericTemplate {
  question: &'static str,
  options: [&'static str; 4],
  answer: AnswerKey,
}

const GENERIC_POOL: [GenericTemplate; 5] = [
  GenericTemplate {
    question: "Which of the following best describes {topic} in {subject}?",
    options: [
      "A fundamental concept in {subject}",
      "An advanced topic in {subject}",
      "A specialized area of {subject}",
      "A theoretical framework in {subject}",
    ],
    answer: AnswerKey::A,
  },
  GenericTemplate {
    question: "What is the primary purpose of studying {topic} in {subject}?",
    options: [
      "To understand theoretical concepts",
      "To solve practical problems",
      "To develop new methodologies",
      "To advance research in the field",
    ],
    answer: AnswerKey::B,
  },
  GenericTemplate {
    question: "How is {topic} typically applied in {subject}?",
    options: [
      "Through practical experiments",
      "Through theoretical analysis",
      "Through computational methods",
      "Through systematic study",
    ],
    answer: AnswerKey::A,
  },
  GenericTemplate {
    question: "Which field is most closely related to {topic} in {subject}?",
    options: [
      "Theoretical research",
      "Applied sciences",
      "Practical applications",
      "Experimental studies",
    ],
    answer: AnswerKey::B,
  },
  GenericTemplate {
    question: "What is a key characteristic of {topic} in {subject}?",
    options: [
      "Its practical applications",
      "Its theoretical foundation",
      "Its systematic approach",
      "Its research methodology",
    ],
    answer: AnswerKey::C,
  },
];

/// Up to `shortfall` generic questions for this subject/topic, pool order
/// randomized before truncation.
pub fn generic_questions<R: Rng>(
  subject: &str,
  topic: &str,
  shortfall: usize,
  rng: &mut R,
) -> Vec<Question> {
  let pairs = [("subject", subject), ("topic", topic)];

  let mut order: Vec<&GenericTemplate> = GENERIC_POOL.iter().collect();
  order.shuffle(rng);

  order
    .into_iter()
    .take(shortfall)
    .map(|tpl| {
      let text = fill_template(tpl.question, &pairs);
      let mut options = Options::default();
      for (key, option) in AnswerKey::ALL.iter().zip(tpl.options.iter()) {
        options.set(*key, fill_template(option, &pairs));
      }
      Question {
        text,
        options,
        answer: tpl.answer,
        explanation: format!(
          "The correct answer is {}. {}",
          tpl.answer.as_str(),
          fill_template(tpl.options[tpl.answer as usize], &pairs)
        ),
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::validate::validate_question;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn fills_exactly_the_shortfall_up_to_pool_size() {
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(generic_questions("physics", "optics", 3, &mut rng).len(), 3);
    assert_eq!(generic_questions("physics", "optics", 5, &mut rng).len(), 5);
    // Pool is exhausted beyond 5.
    assert_eq!(generic_questions("physics", "optics", 8, &mut rng).len(), 5);
    assert!(generic_questions("physics", "optics", 0, &mut rng).is_empty());
  }

  #[test]
  fn every_generic_question_passes_validation() {
    let mut rng = StdRng::seed_from_u64(10);
    for q in generic_questions("chemistry", "acids", 5, &mut rng) {
      assert!(validate_question(&q).is_ok());
      assert!(q.text.contains("acids") || q.text.contains("chemistry"));
    }
  }

  #[test]
  fn shuffle_is_seed_deterministic() {
    let mk = |seed| {
      let mut rng = StdRng::seed_from_u64(seed);
      generic_questions("math", "algebra", 5, &mut rng)
    };
    assert_eq!(mk(5), mk(5));
  }
}
