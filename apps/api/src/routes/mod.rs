pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Actions: one capability per call, always answered with an envelope
        .route(
            "/api/v1/actions/generate-questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/actions/analyze-performance",
            post(handlers::handle_analyze_performance),
        )
        .route(
            "/api/v1/actions/provide-coaching",
            post(handlers::handle_provide_coaching),
        )
        .route(
            "/api/v1/actions/analyze-keyword-relevance",
            post(handlers::handle_analyze_keyword_relevance),
        )
        .route(
            "/api/v1/actions/summarize-answer",
            post(handlers::handle_summarize_answer),
        )
        // Sessions
        .route("/api/v1/sessions", post(session_handlers::handle_start_session))
        .route(
            "/api/v1/sessions/feedback",
            post(session_handlers::handle_session_feedback),
        )
        .with_state(state)
}
