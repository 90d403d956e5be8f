//! Phrase extractor: splits a cleaned corpus into usable sentences and
//! pulls short content-word phrases out of each one. Those phrases become
//! the "key terms" the synthesizer builds questions around.
//!
//! Tagging is a lexicon-and-suffix heuristic, not a trained tagger: a
//! function-word stop list marks non-content tokens, suffix rules separate
//! adjective/verb forms, and remaining content words count as nouns. Runs
//! of content-tagged tokens group greedily into candidate phrases.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Sentences shorter than this carry too little context for a question.
const MIN_SENTENCE_CHARS: usize = 20;
/// Longer sentences make unreadable answer options.
const MAX_SENTENCE_CHARS: usize = 200;

const MAX_PHRASE_TOKENS: usize = 3;
const MIN_PHRASE_CHARS: usize = 4;

/// Boilerplate markers; a sentence containing any of these is navigation or
/// legal chrome, not article prose.
const BLOCKLIST: [&str; 6] = ["click", "copyright", "cookies", "website", "http", "https"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
  Noun,
  Adjective,
  Verb,
  Other,
}

impl Tag {
  fn is_content(self) -> bool {
    matches!(self, Tag::Noun | Tag::Adjective | Tag::Verb)
  }
}

/// High-frequency English function words. These never anchor a question,
/// and they terminate phrase runs during grouping.
fn stop_words() -> &'static HashSet<&'static str> {
  static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
  WORDS.get_or_init(|| {
    [
      // articles & determiners
      "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "all",
      "both", "either", "neither", "such", "another", "other",
      // be-verbs & auxiliaries
      "is", "are", "was", "were", "be", "been", "being", "am",
      "have", "has", "had", "do", "does", "did",
      // modals
      "will", "would", "shall", "should", "may", "might", "can", "could", "must",
      // prepositions
      "to", "of", "in", "for", "on", "with", "at", "by", "from", "into", "about", "between",
      "through", "during", "against", "among", "within", "without", "over", "under", "across",
      "inside", "outside", "along", "around", "upon", "onto",
      // conjunctions & negation
      "and", "or", "but", "nor", "not", "no", "if", "then", "than", "so", "as", "because",
      "while", "although", "though", "when", "where", "whereas",
      // pronouns
      "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
      "my", "your", "his", "its", "our", "their", "who", "whom", "whose", "which", "what",
      // common adverbs & fillers
      "also", "very", "just", "too", "more", "most", "only", "there", "here", "now", "often",
      "however", "thus", "therefore", "rather", "quite", "well",
    ]
    .into_iter()
    .collect()
  })
}

fn tag_token(token: &str) -> Tag {
  let lower = token.to_lowercase();
  if lower.is_empty() || stop_words().contains(lower.as_str()) {
    return Tag::Other;
  }
  if !lower.chars().all(|c| c.is_alphabetic() || c == '-') {
    return Tag::Other;
  }
  // Suffix heuristics; order matters (e.g. "-ed" before the noun default).
  const ADJ_SUFFIXES: [&str; 8] = ["ous", "ful", "ive", "ical", "able", "ible", "less", "ish"];
  const VERB_SUFFIXES: [&str; 5] = ["ing", "ed", "ize", "ise", "ify"];
  if lower.len() > 4 {
    if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
      return Tag::Adjective;
    }
    if VERB_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
      return Tag::Verb;
    }
  }
  // Content words default to noun, the dominant class in reference prose.
  Tag::Noun
}

/// Split a cleaned corpus into sentences on terminal punctuation. The
/// terminator stays attached so answer options read as full sentences.
pub fn split_sentences(corpus: &str) -> Vec<String> {
  let mut sentences = Vec::new();
  let mut current = String::new();
  for ch in corpus.chars() {
    current.push(ch);
    if matches!(ch, '.' | '!' | '?') {
      let s = current.trim();
      if !s.is_empty() {
        sentences.push(s.to_string());
      }
      current.clear();
    }
  }
  let tail = current.trim();
  if !tail.is_empty() {
    sentences.push(tail.to_string());
  }
  sentences
}

/// Sentences worth asking about: inside the length band and free of
/// boilerplate markers.
pub fn usable_sentences(corpus: &str) -> Vec<String> {
  split_sentences(corpus)
    .into_iter()
    .filter(|s| {
      let len = s.chars().count();
      (MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len)
    })
    .filter(|s| {
      let lower = s.to_lowercase();
      !BLOCKLIST.iter().any(|b| lower.contains(b))
    })
    .collect()
}

/// Extract key phrases: greedy runs of content-tagged tokens, kept when the
/// run is at most 3 tokens and at least 4 characters.
pub fn key_phrases(sentence: &str) -> Vec<String> {
  let mut phrases = Vec::new();
  let mut run: Vec<&str> = Vec::new();

  let mut flush = |run: &mut Vec<&str>, phrases: &mut Vec<String>| {
    if !run.is_empty() {
      let phrase = run.join(" ");
      if run.len() <= MAX_PHRASE_TOKENS && phrase.chars().count() >= MIN_PHRASE_CHARS {
        phrases.push(phrase);
      }
      run.clear();
    }
  };

  for raw in sentence.split_whitespace() {
    let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '-');
    if word.is_empty() || !tag_token(word).is_content() {
      flush(&mut run, &mut phrases);
      continue;
    }
    run.push(word);
  }
  flush(&mut run, &mut phrases);

  phrases
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn splits_on_terminal_punctuation() {
    let sents = split_sentences("Water boils at high heat. Ice melts slowly! Does steam rise?");
    assert_eq!(sents.len(), 3);
    assert_eq!(sents[0], "Water boils at high heat.");
    assert_eq!(sents[2], "Does steam rise?");
  }

  #[test]
  fn sentence_band_is_inclusive() {
    // Exactly 20 chars with the final period.
    let short = "Plants need sun now.";
    assert_eq!(short.chars().count(), 20);
    let long = "x".repeat(199) + ".";
    let tiny = "Too short.";
    let corpus = format!("{} {} {}", short, long, tiny);
    let kept = usable_sentences(&corpus);
    assert_eq!(kept.len(), 2);
  }

  #[test]
  fn blocklisted_sentences_are_dropped() {
    let corpus = "Click here to learn more about cells. Mitochondria produce cellular energy.";
    let kept = usable_sentences(corpus);
    assert_eq!(kept.len(), 1);
    assert!(kept[0].starts_with("Mitochondria"));
  }

  #[test]
  fn stop_words_break_phrase_runs() {
    let phrases = key_phrases("Photosynthesis converts light into chemical energy.");
    assert!(phrases.contains(&"Photosynthesis converts light".to_string()));
    assert!(phrases.contains(&"chemical energy".to_string()));
  }

  #[test]
  fn long_runs_and_short_phrases_are_discarded() {
    // Four content tokens in a row: the run exceeds the token cap and is
    // dropped rather than split.
    let phrases = key_phrases("Modern quantum field theory");
    assert!(phrases.is_empty());
    // Two-character leftovers never qualify.
    let phrases = key_phrases("An ox");
    assert!(phrases.is_empty());
  }

  #[test]
  fn function_word_sentences_yield_nothing() {
    assert!(key_phrases("It is what it was and will be.").is_empty());
  }
}
