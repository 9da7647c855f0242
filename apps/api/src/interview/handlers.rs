use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::gateway::{decode_request, ActionResult};
use crate::interview::schema::{
    AnswerSummary, CoachingFeedback, GenerateQuestionsOutput, KeywordRelevance, SentimentAnalysis,
};
use crate::state::AppState;

/// Unreadable bodies are reported through the envelope like any other invalid input.
pub(crate) fn decode_body<R: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<R, AppError> {
    let Json(value) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    decode_request(value)
}

/// POST /api/v1/actions/generate-questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<GenerateQuestionsOutput>> {
    Json(match decode_body(body) {
        Ok(request) => state.gateway.generate_questions(request).await,
        Err(e) => state.gateway.reject("generate_questions", e),
    })
}

/// POST /api/v1/actions/analyze-performance
pub async fn handle_analyze_performance(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<SentimentAnalysis>> {
    Json(match decode_body(body) {
        Ok(request) => state.gateway.analyze_performance(request).await,
        Err(e) => state.gateway.reject("analyze_performance", e),
    })
}

/// POST /api/v1/actions/provide-coaching
pub async fn handle_provide_coaching(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<CoachingFeedback>> {
    Json(match decode_body(body) {
        Ok(request) => state.gateway.provide_coaching(request).await,
        Err(e) => state.gateway.reject("provide_coaching", e),
    })
}

/// POST /api/v1/actions/analyze-keyword-relevance
pub async fn handle_analyze_keyword_relevance(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<KeywordRelevance>> {
    Json(match decode_body(body) {
        Ok(request) => state.gateway.analyze_keyword_relevance(request).await,
        Err(e) => state.gateway.reject("analyze_keyword_relevance", e),
    })
}

/// POST /api/v1/actions/summarize-answer
pub async fn handle_summarize_answer(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<AnswerSummary>> {
    Json(match decode_body(body) {
        Ok(request) => state.gateway.summarize_answer(request).await,
        Err(e) => state.gateway.reject("summarize_answer", e),
    })
}
