//! Content source adapter: fetches reference prose from a MediaWiki
//! `api.php` endpoint, escalating the search query across attempts.
//!
//! The adapter never fails past its boundary. Every failure path (no hits,
//! network error, missing extract, content too thin after cleaning)
//! resolves to a deterministic synthetic paragraph, which is itself short
//! enough that downstream phrase extraction may legitimately produce
//! nothing from it.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::clean::clean_text;
use crate::error::FetchError;
use crate::util::fill_template;

/// Longest article-extract prefix worth keeping per attempt.
const EXTRACT_LIMIT_CHARS: usize = 3000;
/// Cleaned text shorter than this cannot seed question synthesis.
const MIN_CONTENT_CHARS: usize = 200;

const FILLER_NO_RESULTS: &str = "{topic} is an important concept in {subject}. It involves various principles and methods that are widely used in the field. Understanding {topic} is essential for mastering {subject} and its applications in real-world scenarios.";
const FILLER_THIN_CONTENT: &str = "{topic} is a fundamental concept in {subject}. It encompasses various important principles and methodologies. Studying {topic} helps in understanding key aspects of {subject} and its practical applications.";
const FILLER_FETCH_ERROR: &str = "{topic} is a crucial element in {subject}. It plays a vital role in understanding and applying key concepts. Mastering {topic} is essential for success in {subject} and related fields.";

/// Pluggable reference-text provider: text in, text out, no failure. Any
/// source satisfying this contract can stand in for Wikipedia.
#[async_trait]
pub trait ContentSource: Send + Sync {
  async fn fetch(&self, subject: &str, topic: &str, attempt: usize, broader: bool) -> String;
}

/// Search query for one attempt. Later attempts drop qualifiers; the
/// broadened form overrides the attempt schedule entirely.
pub fn build_query(subject: &str, topic: &str, attempt: usize, broader: bool) -> String {
  if broader {
    topic.to_string()
  } else {
    match attempt {
      0 => format!("{} {}", topic, subject),
      1 => format!("{} definition {}", topic, subject),
      _ => format!("{} introduction", topic),
    }
  }
}

fn filler(template: &'static str, subject: &str, topic: &str) -> String {
  fill_template(template, &[("subject", subject), ("topic", topic)])
}

pub struct WikiClient {
  client: reqwest::Client,
  base_url: String,
}

impl WikiClient {
  /// Build the client with a bounded per-request timeout; a timed-out
  /// fetch routes through the same filler path as any other failure.
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Option<Self> {
    let client = reqwest::Client::builder().timeout(timeout).build().ok()?;
    Some(Self { client, base_url: base_url.into() })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  #[instrument(level = "info", skip(self), fields(%query))]
  async fn search(&self, query: &str) -> Result<Vec<SearchHit>, FetchError> {
    let url = format!("{}/api.php", self.base_url);
    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, "quizforge-backend/0.1")
      .query(&[
        ("action", "query"),
        ("list", "search"),
        ("srsearch", query),
        ("format", "json"),
      ])
      .send()
      .await
      .map_err(|e| FetchError::Http(e.to_string()))?;

    if !res.status().is_success() {
      return Err(FetchError::Http(format!("search HTTP {}", res.status())));
    }

    let body: SearchResponse = res.json().await.map_err(|e| FetchError::Http(e.to_string()))?;
    let hits = body.query.map(|q| q.search).unwrap_or_default();
    if hits.is_empty() {
      return Err(FetchError::NoResults);
    }
    Ok(hits)
  }

  #[instrument(level = "info", skip(self))]
  async fn page_extract(&self, page_id: u64) -> Result<String, FetchError> {
    let url = format!("{}/api.php", self.base_url);
    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, "quizforge-backend/0.1")
      .query(&[
        ("action", "query"),
        ("prop", "extracts"),
        ("explaintext", "1"),
        ("pageids", page_id.to_string().as_str()),
        ("format", "json"),
      ])
      .send()
      .await
      .map_err(|e| FetchError::Http(e.to_string()))?;

    if !res.status().is_success() {
      return Err(FetchError::Http(format!("extract HTTP {}", res.status())));
    }

    let body: ExtractResponse = res.json().await.map_err(|e| FetchError::Http(e.to_string()))?;
    body
      .query
      .and_then(|q| q.pages.into_values().next())
      .and_then(|p| p.extract)
      .ok_or(FetchError::MissingExtract)
  }
}

#[async_trait]
impl ContentSource for WikiClient {
  #[instrument(level = "info", skip(self), fields(%subject, %topic, attempt, broader))]
  async fn fetch(&self, subject: &str, topic: &str, attempt: usize, broader: bool) -> String {
    let query = build_query(subject, topic, attempt, broader);

    let hits = match self.search(&query).await {
      Ok(hits) => hits,
      Err(FetchError::NoResults) => {
        info!(target: "quiz_source", %query, "No articles found; substituting filler text");
        return filler(FILLER_NO_RESULTS, subject, topic);
      }
      Err(e) => {
        error!(target: "quiz_source", %query, error = %e, "Search failed; substituting filler text");
        return filler(FILLER_FETCH_ERROR, subject, topic);
      }
    };

    // Repeated attempts past the hit count re-use the last result rather
    // than failing.
    let index = attempt.min(hits.len() - 1);
    let page_id = hits[index].pageid;

    let extract = match self.page_extract(page_id).await {
      Ok(extract) => extract,
      Err(e) => {
        error!(target: "quiz_source", page_id, error = %e, "Extract fetch failed; substituting filler text");
        return filler(FILLER_FETCH_ERROR, subject, topic);
      }
    };

    let truncated: String = extract.chars().take(EXTRACT_LIMIT_CHARS).collect();
    let cleaned = clean_text(&truncated);
    if cleaned.chars().count() < MIN_CONTENT_CHARS {
      info!(target: "quiz_source", page_id, len = cleaned.len(), "Content too short after cleaning; substituting filler text");
      return filler(FILLER_THIN_CONTENT, subject, topic);
    }

    info!(target: "quiz_source", page_id, len = cleaned.len(), "Fetched article content");
    cleaned
  }
}

/// Offline stand-in used when no HTTP client can be built: always serves
/// the synthetic filler paragraph, so generation degrades instead of dying.
pub struct SyntheticSource;

#[async_trait]
impl ContentSource for SyntheticSource {
  async fn fetch(&self, subject: &str, topic: &str, _attempt: usize, _broader: bool) -> String {
    filler(FILLER_NO_RESULTS, subject, topic)
  }
}

// --- MediaWiki DTOs ---

#[derive(Deserialize)]
struct SearchResponse {
  #[serde(default)]
  query: Option<SearchQuery>,
}
#[derive(Deserialize)]
struct SearchQuery {
  #[serde(default)]
  search: Vec<SearchHit>,
}
#[derive(Deserialize)]
struct SearchHit {
  pageid: u64,
}

#[derive(Deserialize)]
struct ExtractResponse {
  #[serde(default)]
  query: Option<ExtractQuery>,
}
#[derive(Deserialize)]
struct ExtractQuery {
  #[serde(default)]
  pages: HashMap<String, PageExtract>,
}
#[derive(Deserialize)]
struct PageExtract {
  #[serde(default)]
  extract: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn query_escalates_across_attempts() {
    assert_eq!(build_query("biology", "osmosis", 0, false), "osmosis biology");
    assert_eq!(build_query("biology", "osmosis", 1, false), "osmosis definition biology");
    assert_eq!(build_query("biology", "osmosis", 2, false), "osmosis introduction");
    assert_eq!(build_query("biology", "osmosis", 7, false), "osmosis introduction");
  }

  #[test]
  fn broader_flag_overrides_the_attempt_schedule() {
    assert_eq!(build_query("biology", "osmosis", 0, true), "osmosis");
    assert_eq!(build_query("biology", "osmosis", 2, true), "osmosis");
  }

  #[test]
  fn filler_variants_mention_both_terms() {
    for tpl in [FILLER_NO_RESULTS, FILLER_THIN_CONTENT, FILLER_FETCH_ERROR] {
      let text = filler(tpl, "computer science", "recursion");
      assert!(text.contains("recursion"));
      assert!(text.contains("computer science"));
      assert!(text.chars().count() >= MIN_CONTENT_CHARS);
    }
  }

  #[test]
  fn search_response_decodes_hits() {
    let body = r#"{"query":{"search":[{"pageid":123,"title":"Osmosis"},{"pageid":456}]}}"#;
    let decoded: SearchResponse = serde_json::from_str(body).unwrap();
    let hits = decoded.query.unwrap().search;
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].pageid, 123);
  }

  #[test]
  fn extract_response_tolerates_missing_extract() {
    let body = r#"{"query":{"pages":{"123":{"ns":0}}}}"#;
    let decoded: ExtractResponse = serde_json::from_str(body).unwrap();
    let page = decoded.query.unwrap().pages.into_values().next().unwrap();
    assert!(page.extract.is_none());
  }
}
