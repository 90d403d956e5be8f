//! Error taxonomy. None of these escape `QuizEngine::generate`: fetch
//! failures resolve to filler text, cache failures degrade to miss/no-op,
//! and rejections discard a single candidate question.

use thiserror::Error;

/// Content lookup failures. Consumed inside the adapter.
#[derive(Error, Debug)]
pub enum FetchError {
  #[error("HTTP error: {0}")]
  Http(String),
  #[error("search returned no results")]
  NoResults,
  #[error("page extract missing from response")]
  MissingExtract,
}

/// Cache read/write failures. A failed read is a miss; a failed write is a
/// logged no-op.
#[derive(Error, Debug)]
pub enum CacheError {
  #[error("cache io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("cache encode/decode error: {0}")]
  Serde(#[from] serde_json::Error),
}

/// Why a single candidate question was discarded. Aggregated by the
/// orchestrator so rejection reasons stay inspectable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
  #[error("sentence produced no key phrases")]
  NoKeyPhrases,
  #[error("template placeholders could not be filled")]
  TemplateFormat,
  #[error("question text empty")]
  EmptyQuestion,
  #[error("one or more options empty")]
  EmptyOption,
  #[error("question text shorter than 10 characters")]
  QuestionTooShort,
}
