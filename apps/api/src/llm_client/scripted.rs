//! In-process `ModelBackend` for tests. Replies come from a closure, so tests
//! can script success, malformed output, or failure per capability and prompt.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionRequest, LlmError, ModelBackend};

type Responder = dyn Fn(&CompletionRequest<'_>) -> Result<String, LlmError> + Send + Sync;

pub struct ScriptedBackend {
    responder: Box<Responder>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest<'_>) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A backend that answers every capability with a valid reply.
    pub fn happy() -> Self {
        Self::new(|req| Ok(happy_reply(req)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, capability: &str) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == capability)
            .count()
    }

    pub fn prompts_for(&self, capability: &str) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == capability)
            .map(|(_, p)| p.clone())
            .collect()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((request.capability.to_string(), request.prompt.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        (self.responder)(request)
    }
}

/// Valid JSON for whichever capability the request belongs to.
pub fn happy_reply(request: &CompletionRequest<'_>) -> String {
    match request.capability {
        "generate_questions" => {
            let count = requested_question_count(request.prompt);
            let questions: Vec<String> = (1..=count)
                .map(|i| format!("Question {i}: tell me about a relevant project."))
                .collect();
            serde_json::json!({ "questions": questions }).to_string()
        }
        "analyze_performance" => serde_json::json!({
            "overallSentiment": "positive",
            "confidenceLevel": "high",
            "areasForImprovement": "Quantify outcomes more often."
        })
        .to_string(),
        "provide_coaching" => {
            serde_json::json!({ "feedback": "Lead with the result, then the context." }).to_string()
        }
        "analyze_keyword_relevance" => {
            serde_json::json!({ "relevanceAnalysis": "Mentions Rust and distributed systems." })
                .to_string()
        }
        "summarize_answer" => {
            serde_json::json!({ "summary": "Candidate led a migration." }).to_string()
        }
        other => panic!("no scripted reply for capability {other}"),
    }
}

/// Reads N back out of "Please generate N interview questions".
fn requested_question_count(prompt: &str) -> usize {
    prompt
        .split("Please generate ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(5)
}
