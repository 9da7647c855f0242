use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
///
/// Never crosses into the UI tier as-is: the action gateway turns every variant
/// into the `error` string of a failure envelope via `user_message`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl AppError {
    /// The string shown to the caller. Backend causes are logged here and only
    /// included in the message when `expose_backend_errors` is set.
    pub fn user_message(&self, fallback: &str, expose_backend_errors: bool) -> String {
        match self {
            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {msg}");
                format!("Invalid input: {msg}")
            }
            AppError::Session(msg) => {
                tracing::debug!("Session error: {msg}");
                format!("Invalid session: {msg}")
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                if expose_backend_errors {
                    format!("{fallback} ({e})")
                } else {
                    fallback.to_string()
                }
            }
        }
    }
}
