//! HTTP API handlers for FlagGlobe.
//!
//! This is the surface the presentation layer consumes: it renders aggregate
//! results 1:1 as JSON and owns nothing beyond request wiring. A failed
//! primary lookup still answers `200 OK` — the error affordance is the
//! non-null `error` field inside the body, which the UI renders as its own
//! distinct state.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::aggregation::Aggregator;
use crate::model::AggregateResult;
use crate::quiz::{QUESTIONS, QuizQuestion};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/country/:name", get(get_country))
        .route("/compare", get(compare_countries))
        .route("/quiz", get(get_quiz))
        .route("/quiz/check", post(check_quiz_answer))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /country/:name - Look up one country.
///
/// # Response
///
/// An `AggregateResult`: either a populated `record` with related `articles`
/// (possibly empty) and `error: null`, or `record: null` with `error` set.
#[instrument(skip(state))]
pub async fn get_country(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<AggregateResult> {
    let result = state.aggregator.get_country_info(&name).await;

    info!(
        query = %name,
        success = result.is_success(),
        article_count = result.articles.len(),
        "Country queried"
    );

    Json(result)
}

/// Query parameters for the comparison endpoint.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// First country name.
    pub first: String,

    /// Second country name.
    pub second: String,
}

/// Response for GET /compare: two independent results, presented together.
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub first: AggregateResult,
    pub second: AggregateResult,
}

/// GET /compare?first=X&second=Y - Side-by-side lookup of two countries.
///
/// The two sides are independent: one failing does not affect the other's
/// completeness.
#[instrument(skip(state))]
pub async fn compare_countries(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Json<CompareResponse> {
    let (first, second) = state
        .aggregator
        .compare_countries(&query.first, &query.second)
        .await;

    info!(
        first = %query.first,
        second = %query.second,
        first_success = first.is_success(),
        second_success = second.is_success(),
        "Countries compared"
    );

    Json(CompareResponse { first, second })
}

/// Response for GET /quiz.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    /// The quiz questions, answers omitted.
    pub questions: &'static [QuizQuestion],
}

/// GET /quiz - The static quiz fixture, without answers.
pub async fn get_quiz() -> Json<QuizResponse> {
    Json(QuizResponse {
        questions: QUESTIONS,
    })
}

/// Request body for POST /quiz/check.
#[derive(Debug, Deserialize)]
pub struct CheckAnswerRequest {
    /// Zero-based index into the quiz fixture.
    pub question: usize,

    /// The option the player selected.
    pub answer: String,
}

/// Response for POST /quiz/check.
#[derive(Debug, Serialize)]
pub struct CheckAnswerResponse {
    pub correct: bool,
}

/// POST /quiz/check - Score one selected option.
///
/// Returns `404 Not Found` for a question index outside the fixture.
#[instrument]
pub async fn check_quiz_answer(
    Json(request): Json<CheckAnswerRequest>,
) -> Result<Json<CheckAnswerResponse>, StatusCode> {
    let question = QUESTIONS.get(request.question).ok_or_else(|| {
        warn!(question = request.question, "Unknown quiz question index");
        StatusCode::NOT_FOUND
    })?;

    Ok(Json(CheckAnswerResponse {
        correct: question.is_correct(&request.answer),
    }))
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
