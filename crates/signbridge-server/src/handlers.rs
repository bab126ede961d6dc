//! HTTP route handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use serde::{Deserialize, Serialize};
use signbridge_core::{Quiz, Translation, generate_quiz as build_quiz, translate};
use tracing::{debug, warn};

use crate::health::{DictionaryCounts, HealthResponse, health_check};
use crate::metrics::{
    QUIZ_ERRORS_TOTAL, QUIZ_REQUESTS_TOTAL, TRANSLATE_REQUESTS_TOTAL, TRANSLATION_URLS_TOTAL,
    render,
};
use crate::server::AppState;

/// Body of `POST /api/translate-text`.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateRequest {
    /// Text to translate. Missing or `null` is treated as empty.
    #[serde(default)]
    pub text: Option<String>,
}

/// Body of `GET /api/generate-quiz`: either a quiz or an error payload.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuizResponse {
    /// A generated quiz.
    Quiz(Quiz),
    /// The dictionary could not supply a quiz.
    Error {
        /// Human-readable reason.
        error: String,
    },
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Fixed liveness message.
    pub status: &'static str,
}

/// `GET /`
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "SignBridge Backend is running!",
    })
}

/// Body of a rejected request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
}

/// `POST /api/translate-text`
///
/// The body is parsed as JSON whatever the `Content-Type` header says.
pub async fn translate_text(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Translation>, (StatusCode, Json<ErrorResponse>)> {
    counter!(TRANSLATE_REQUESTS_TOTAL).increment(1);
    let req: TranslateRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "rejecting translate body");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("invalid request body: {e}"),
            }),
        )
    })?;
    let text = req.text.unwrap_or_default();
    if text.is_empty() {
        return Ok(Json(Translation::default()));
    }

    let translation = translate(&state.dictionaries, &text);
    debug!(urls = translation.len(), "translated text");
    counter!(TRANSLATION_URLS_TOTAL).increment(translation.len() as u64);
    Ok(Json(translation))
}

/// `GET /api/generate-quiz`
///
/// A dictionary too small for a quiz answers 200 with `{"error": ...}`.
pub async fn generate_quiz(State(state): State<AppState>) -> Json<QuizResponse> {
    counter!(QUIZ_REQUESTS_TOTAL).increment(1);
    let result = {
        let mut rng = state.quiz_rng.lock();
        build_quiz(&state.dictionaries.words, &mut *rng)
    };

    match result {
        Ok(quiz) => Json(QuizResponse::Quiz(quiz)),
        Err(e) => {
            warn!(error = %e, "quiz generation failed");
            counter!(QUIZ_ERRORS_TOTAL).increment(1);
            Json(QuizResponse::Error {
                error: e.to_string(),
            })
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health_check(
        state.start_time,
        state.connection_count(),
        DictionaryCounts::from(state.dictionaries.as_ref()),
    ))
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [("content-type", "text/plain; version=0.0.4")],
            render(handle),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
