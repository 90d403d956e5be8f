//! Template synthesizer: turns a usable sentence plus its key phrases into
//! a multiple-choice question. The sentence itself is the correct answer;
//! key phrases from the *other* sentences become distractors.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{AnswerKey, Difficulty, Options, Question};
use crate::error::Rejection;
use crate::extract;
use crate::util::fill_template;
use crate::validate::validate_question;

/// Question category a template belongs to. Determines which placeholders
/// the pattern expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
  Definition,
  Description,
  Relationship,
  Purpose,
  Analysis,
  Impact,
}

/// A static question pattern. `{term}` is always present; relationship,
/// analysis and impact patterns also use `{topic}`, purpose uses `{subject}`.
pub struct QuestionTemplate {
  pub pattern: &'static str,
  pub category: Category,
}

const BEGINNER_TEMPLATES: [QuestionTemplate; 2] = [
  QuestionTemplate { pattern: "What is {term}?", category: Category::Definition },
  QuestionTemplate {
    pattern: "Which of the following best describes {term}?",
    category: Category::Description,
  },
];

const INTERMEDIATE_TEMPLATES: [QuestionTemplate; 2] = [
  QuestionTemplate { pattern: "How does {term} relate to {topic}?", category: Category::Relationship },
  QuestionTemplate {
    pattern: "What is the main purpose of {term} in {subject}?",
    category: Category::Purpose,
  },
];

const ADVANCED_TEMPLATES: [QuestionTemplate; 2] = [
  QuestionTemplate {
    pattern: "What is the significance of {term} in the context of {topic}?",
    category: Category::Analysis,
  },
  QuestionTemplate { pattern: "How does {term} impact {topic}?", category: Category::Impact },
];

pub fn templates_for(difficulty: Difficulty) -> &'static [QuestionTemplate; 2] {
  match difficulty {
    Difficulty::Beginner => &BEGINNER_TEMPLATES,
    Difficulty::Intermediate => &INTERMEDIATE_TEMPLATES,
    Difficulty::Advanced => &ADVANCED_TEMPLATES,
  }
}

/// Build one candidate question from a sentence. Fails with a typed
/// rejection instead of panicking; the caller discards the candidate and
/// moves on.
pub fn synthesize_question<R: Rng>(
  sentence: &str,
  phrases: &[String],
  distractor_pool: &[String],
  subject: &str,
  topic: &str,
  difficulty: Difficulty,
  rng: &mut R,
) -> Result<Question, Rejection> {
  let template = templates_for(difficulty)
    .choose(rng)
    .ok_or(Rejection::TemplateFormat)?;
  let key_term = phrases.choose(rng).ok_or(Rejection::NoKeyPhrases)?;

  // Each category names the placeholders it may use; definition and
  // description patterns take the key term alone, purpose patterns bring in
  // the subject, the rest bring in the topic.
  let text = match template.category {
    Category::Definition | Category::Description => {
      fill_template(template.pattern, &[("term", key_term)])
    }
    Category::Purpose => {
      fill_template(template.pattern, &[("term", key_term), ("subject", subject)])
    }
    Category::Relationship | Category::Analysis | Category::Impact => {
      fill_template(template.pattern, &[("term", key_term), ("topic", topic)])
    }
  };
  // A leftover placeholder means the pattern asked for something its
  // category could not supply; reject this candidate only.
  if text.contains('{') || text.contains('}') {
    return Err(Rejection::TemplateFormat);
  }

  // Up to 3 distinct distractors from other sentences' phrases, padded with
  // deterministic filler so exactly 3 always exist.
  let mut seen = HashSet::new();
  let mut distractors: Vec<String> = distractor_pool
    .iter()
    .filter(|p| p.as_str() != sentence && seen.insert(p.as_str()))
    .take(3)
    .cloned()
    .collect();
  while distractors.len() < 3 {
    distractors.push(format!("None of the above statements about {} are correct", key_term));
  }

  let correct = *AnswerKey::ALL.choose(rng).ok_or(Rejection::TemplateFormat)?;
  let mut options = Options::default();
  options.set(correct, sentence.to_string());
  let mut next = distractors.into_iter();
  for key in AnswerKey::ALL {
    if key == correct {
      continue;
    }
    let filler = next
      .next()
      .unwrap_or_else(|| format!("Alternative explanation of {}", key_term));
    options.set(key, filler);
  }

  Ok(Question {
    text,
    options,
    answer: correct,
    explanation: format!("The correct answer is {}. {}", correct.as_str(), sentence),
  })
}

/// One attempt's worth of synthesis over a cleaned corpus.
#[derive(Debug, Default)]
pub struct BatchOutcome {
  pub questions: Vec<Question>,
  pub rejections: Vec<Rejection>,
}

/// Walk the corpus in order, synthesizing and validating one candidate per
/// eligible sentence until `want` questions exist or sentences run out.
pub fn synthesize_batch<R: Rng>(
  corpus: &str,
  subject: &str,
  topic: &str,
  difficulty: Difficulty,
  want: usize,
  rng: &mut R,
) -> BatchOutcome {
  let sentences = extract::usable_sentences(corpus);
  let phrase_sets: Vec<Vec<String>> = sentences.iter().map(|s| extract::key_phrases(s)).collect();

  let mut outcome = BatchOutcome::default();
  let mut used_sentences: HashSet<&str> = HashSet::new();

  for (i, sentence) in sentences.iter().enumerate() {
    if outcome.questions.len() >= want {
      break;
    }
    if !used_sentences.insert(sentence.as_str()) {
      continue;
    }
    if phrase_sets[i].is_empty() {
      outcome.rejections.push(Rejection::NoKeyPhrases);
      continue;
    }

    let pool: Vec<String> = phrase_sets
      .iter()
      .enumerate()
      .filter(|(j, _)| *j != i)
      .flat_map(|(_, phrases)| phrases.iter().cloned())
      .collect();

    let candidate = synthesize_question(
      sentence,
      &phrase_sets[i],
      &pool,
      subject,
      topic,
      difficulty,
      rng,
    )
    .and_then(|q| validate_question(&q).map(|_| q));

    match candidate {
      Ok(q) => outcome.questions.push(q),
      Err(r) => outcome.rejections.push(r),
    }
  }

  outcome
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const SENTENCE: &str = "Photosynthesis converts light into chemical energy.";

  fn phrases() -> Vec<String> {
    vec!["Photosynthesis converts light".into(), "chemical energy".into()]
  }

  #[test]
  fn correct_answer_sits_on_the_chosen_key() {
    let mut rng = StdRng::seed_from_u64(7);
    let pool: Vec<String> = vec!["cell walls".into(), "osmotic pressure".into(), "root systems".into()];
    let q = synthesize_question(SENTENCE, &phrases(), &pool, "biology", "plants", Difficulty::Beginner, &mut rng)
      .expect("candidate");
    assert_eq!(q.options.get(q.answer), SENTENCE);
    assert!(q.explanation.contains(q.answer.as_str()));
    assert!(q.explanation.contains(SENTENCE));
    for (_, text) in q.options.iter() {
      assert!(!text.is_empty());
    }
  }

  #[test]
  fn short_pool_pads_with_filler_distractors() {
    let mut rng = StdRng::seed_from_u64(1);
    let q = synthesize_question(SENTENCE, &phrases(), &[], "biology", "plants", Difficulty::Advanced, &mut rng)
      .expect("candidate");
    let fillers = q
      .options
      .iter()
      .filter(|(k, _)| *k != q.answer)
      .filter(|(_, text)| text.starts_with("None of the above statements about"))
      .count();
    assert_eq!(fillers, 3);
  }

  #[test]
  fn empty_phrase_list_is_rejected() {
    let mut rng = StdRng::seed_from_u64(2);
    let err = synthesize_question(SENTENCE, &[], &[], "biology", "plants", Difficulty::Beginner, &mut rng)
      .unwrap_err();
    assert_eq!(err, Rejection::NoKeyPhrases);
  }

  #[test]
  fn fixed_seed_gives_identical_candidates() {
    let pool: Vec<String> = vec!["cell walls".into(), "osmotic pressure".into()];
    let mk = || {
      let mut rng = StdRng::seed_from_u64(42);
      synthesize_question(SENTENCE, &phrases(), &pool, "biology", "plants", Difficulty::Intermediate, &mut rng)
        .expect("candidate")
    };
    assert_eq!(mk(), mk());
  }

  #[test]
  fn batch_stops_at_requested_count() {
    let corpus = "Mitochondria produce cellular energy inside cells. \
                  Ribosomes assemble proteins from amino acids. \
                  Chloroplasts capture sunlight for photosynthesis.";
    let mut rng = StdRng::seed_from_u64(3);
    let out = synthesize_batch(corpus, "biology", "cells", Difficulty::Beginner, 2, &mut rng);
    assert_eq!(out.questions.len(), 2);
    assert_ne!(out.questions[0].text, out.questions[1].text);
  }

  #[test]
  fn empty_corpus_yields_empty_batch() {
    let mut rng = StdRng::seed_from_u64(4);
    let out = synthesize_batch("", "biology", "cells", Difficulty::Beginner, 5, &mut rng);
    assert!(out.questions.is_empty());
    assert!(out.rejections.is_empty());
  }
}
