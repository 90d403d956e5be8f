//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! engine and evaluator; each is instrumented with its input parameters
//! and basic result info.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, instrument};

use crate::parse::parse_quiz_text;
use crate::protocol::*;
use crate::score::evaluate_quiz;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, body), fields(subject = %body.subject, topic = %body.topic))]
pub async fn http_post_quiz(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> impl IntoResponse {
  let req = body.into_request();
  let questions = state.engine.generate(&req).await;
  info!(target: "quizgen", subject = %req.subject, topic = %req.topic, served = questions.len(), "HTTP quiz served");
  Json(QuizOut { questions })
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_parse(Json(body): Json<ParseIn>) -> impl IntoResponse {
  let questions = parse_quiz_text(&body.text);
  info!(target: "quizgen", parsed = questions.len(), "HTTP quiz text parsed");
  Json(QuizOut { questions })
}

#[instrument(level = "info", skip(body),
             fields(questions = body.questions.len(), answers = body.answers.len()))]
pub async fn http_post_score(Json(body): Json<EvaluateIn>) -> impl IntoResponse {
  let result = evaluate_quiz(&body.questions, &body.answers);
  info!(target: "quizgen", correct = result.correct, total = result.total, "HTTP submission scored");
  Json(ScoreOut { correct: result.correct, total: result.total })
}
