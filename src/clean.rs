//! Content cleaner: normalizes fetched article text into a corpus the
//! phrase extractor can work with. Citation markers and parenthetical
//! asides carry little quizzable content, so both are dropped wholesale.

use std::sync::OnceLock;

use regex::Regex;

fn re(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
  cell.get_or_init(|| Regex::new(pattern).expect("static regex"))
}

/// Clean raw article text:
/// - strip `[n]` citation markers
/// - strip parenthetical asides
/// - drop characters outside word chars, whitespace and `.,!?;:-`
/// - collapse whitespace runs to a single space
/// - each punctuation mark is followed by exactly one space
pub fn clean_text(text: &str) -> String {
  static CITATIONS: OnceLock<Regex> = OnceLock::new();
  static PARENS: OnceLock<Regex> = OnceLock::new();
  static CHARSET: OnceLock<Regex> = OnceLock::new();
  static SPACES: OnceLock<Regex> = OnceLock::new();
  static PUNCT: OnceLock<Regex> = OnceLock::new();

  let text = re(&CITATIONS, r"\[\d+\]").replace_all(text, "");
  let text = re(&PARENS, r"\([^)]*\)").replace_all(&text, "");
  let text = re(&CHARSET, r"[^\w\s.,!?;:-]").replace_all(&text, "");
  let text = re(&SPACES, r"\s+").replace_all(&text, " ");
  let text = re(&PUNCT, r"\s*([.,!?;:])\s*").replace_all(&text, "$1 ");
  text.trim().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_citations_parens_and_extra_whitespace() {
    let cleaned = clean_text("Quantum physics [3] (briefly) is   hard.");
    assert_eq!(cleaned, "Quantum physics is hard.");
  }

  #[test]
  fn normalizes_punctuation_spacing() {
    let cleaned = clean_text("Cells divide;mitosis follows .Growth continues");
    assert_eq!(cleaned, "Cells divide; mitosis follows. Growth continues");
  }

  #[test]
  fn drops_special_characters_but_keeps_basic_punctuation() {
    let cleaned = clean_text("Energy = mc^2 — roughly, mass & light!");
    assert!(!cleaned.contains('='));
    assert!(!cleaned.contains('&'));
    assert!(cleaned.contains("mass"));
    assert!(cleaned.ends_with("light!"));
  }

  #[test]
  fn empty_input_stays_empty() {
    assert_eq!(clean_text("   "), "");
  }
}
