use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::interview::gateway::ActionResult;
use crate::interview::handlers::decode_body;
use crate::interview::schema::GenerateQuestionsRequest;
use crate::session::aggregator::{start_session, FeedbackView, ReviewSession, StartedSession};
use crate::session::models::SessionFeedbackRequest;
use crate::state::AppState;

/// POST /api/v1/sessions
pub async fn handle_start_session(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<StartedSession>> {
    Json(match decode_body::<GenerateQuestionsRequest>(body) {
        Ok(request) => start_session(&state.gateway, request).await,
        Err(e) => state.gateway.reject("start_session", e),
    })
}

/// POST /api/v1/sessions/feedback
pub async fn handle_session_feedback(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Json<ActionResult<FeedbackView>> {
    Json(match session_feedback(&state, body).await {
        Ok(view) => ActionResult::Success(view),
        Err(e) => state.gateway.reject("session_feedback", e),
    })
}

async fn session_feedback(
    state: &AppState,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<FeedbackView, AppError> {
    let request: SessionFeedbackRequest = decode_body(body)?;
    let mut review = ReviewSession::new(request.into_session())?;
    state.aggregator.analyze(&mut review).await?;
    Ok(review.view())
}
