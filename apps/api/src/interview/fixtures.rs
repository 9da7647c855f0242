//! Shared test fixtures for the interview and session modules.

use std::sync::Arc;
use std::time::Duration;

use crate::interview::gateway::ActionGateway;
use crate::interview::summarize::TruncatingSummarizer;
use crate::llm_client::scripted::ScriptedBackend;
use crate::llm_client::AiClient;

/// A realistic job description comfortably above the minimum length.
pub const JD: &str = "Senior Rust Engineer, Storage Platform. You will design distributed \
    storage services, own on-call for the ingestion pipeline, and mentor two junior engineers. \
    Required: 5+ years of systems programming, Tokio, Postgres.";

pub fn gateway_with(backend: Arc<ScriptedBackend>) -> ActionGateway {
    let client = AiClient::new(backend, Duration::from_secs(5));
    ActionGateway::new(client, Arc::new(TruncatingSummarizer))
}
