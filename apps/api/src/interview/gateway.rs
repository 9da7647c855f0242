//! Action gateway, the trust boundary between UI input and the capability flows.
//!
//! Every action validates its request, runs at most one flow, and settles into
//! an `ActionResult` envelope. Nothing here returns `Err`: failures are data.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::errors::AppError;
use crate::interview::flows::{
    AnalyzeKeywordRelevance, AnalyzePerformance, Flow, GenerateQuestions, ProvideCoaching,
};
use crate::interview::schema::{
    AnalyzeKeywordRelevanceRequest, AnalyzePerformanceRequest, AnswerSummary, CoachingFeedback,
    GenerateQuestionsOutput, GenerateQuestionsRequest, KeywordRelevance, ProvideCoachingRequest,
    SentimentAnalysis, SummarizeAnswerRequest,
};
use crate::interview::summarize::Summarizer;
use crate::interview::validation::{
    validate_analyze_keyword_relevance, validate_analyze_performance, validate_generate_questions,
    validate_provide_coaching, validate_summarize_answer,
};
use crate::llm_client::AiClient;

const GENERATE_QUESTIONS_FAILED: &str = "Failed to generate questions. Please try again.";
const ANALYZE_PERFORMANCE_FAILED: &str = "Failed to analyze performance.";
const PROVIDE_COACHING_FAILED: &str = "Failed to provide coaching.";
const KEYWORD_RELEVANCE_FAILED: &str = "Failed to analyze keyword relevance.";
const SUMMARIZE_FAILED: &str = "Failed to summarize answer.";

// ────────────────────────────────────────────────────────────────────────────
// Envelope
// ────────────────────────────────────────────────────────────────────────────

/// Uniform outcome of an action. Serializes as `{ success, data?, error? }`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<T> {
    Success(T),
    Failure(String),
}

impl<T> ActionResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ActionResult::Success(data) => Some(data),
            ActionResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Failure(error) => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        match self {
            ActionResult::Success(data) => ActionResult::Success(f(data)),
            ActionResult::Failure(error) => ActionResult::Failure(error),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ActionResult::Success(data) => Ok(data),
            ActionResult::Failure(error) => Err(error),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<T: Serialize> Serialize for ActionResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            success: self.is_success(),
            data: self.data(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

/// Decodes an untrusted JSON body into a request type. Type mismatches become
/// validation errors so they reach the caller as a failure envelope.
pub fn decode_request<R: DeserializeOwned>(body: serde_json::Value) -> Result<R, AppError> {
    serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

/// Stateless between calls; share one instance behind an `Arc`.
pub struct ActionGateway {
    questions: Flow<GenerateQuestions>,
    performance: Flow<AnalyzePerformance>,
    coaching: Flow<ProvideCoaching>,
    keywords: Flow<AnalyzeKeywordRelevance>,
    summarizer: Arc<dyn Summarizer>,
    expose_backend_errors: bool,
}

impl ActionGateway {
    pub fn new(client: AiClient, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            questions: Flow::new(client.clone()),
            performance: Flow::new(client.clone()),
            coaching: Flow::new(client.clone()),
            keywords: Flow::new(client),
            summarizer,
            expose_backend_errors: false,
        }
    }

    pub fn with_backend_errors_exposed(mut self, expose: bool) -> Self {
        self.expose_backend_errors = expose;
        self
    }

    pub async fn generate_questions(
        &self,
        request: GenerateQuestionsRequest,
    ) -> ActionResult<GenerateQuestionsOutput> {
        let outcome = match validate_generate_questions(request) {
            Ok(input) => self.questions.run(&input).await.map_err(AppError::from),
            Err(e) => Err(e),
        };
        self.settle("generate_questions", GENERATE_QUESTIONS_FAILED, outcome)
    }

    pub async fn analyze_performance(
        &self,
        request: AnalyzePerformanceRequest,
    ) -> ActionResult<SentimentAnalysis> {
        let outcome = match validate_analyze_performance(request) {
            Ok(input) => self.performance.run(&input).await.map_err(AppError::from),
            Err(e) => Err(e),
        };
        self.settle("analyze_performance", ANALYZE_PERFORMANCE_FAILED, outcome)
    }

    pub async fn provide_coaching(
        &self,
        request: ProvideCoachingRequest,
    ) -> ActionResult<CoachingFeedback> {
        let outcome = match validate_provide_coaching(request) {
            Ok(input) => self.coaching.run(&input).await.map_err(AppError::from),
            Err(e) => Err(e),
        };
        self.settle("provide_coaching", PROVIDE_COACHING_FAILED, outcome)
    }

    pub async fn analyze_keyword_relevance(
        &self,
        request: AnalyzeKeywordRelevanceRequest,
    ) -> ActionResult<KeywordRelevance> {
        let outcome = match validate_analyze_keyword_relevance(request) {
            Ok(input) => self.keywords.run(&input).await.map_err(AppError::from),
            Err(e) => Err(e),
        };
        self.settle("analyze_keyword_relevance", KEYWORD_RELEVANCE_FAILED, outcome)
    }

    pub async fn summarize_answer(
        &self,
        request: SummarizeAnswerRequest,
    ) -> ActionResult<AnswerSummary> {
        let outcome = match validate_summarize_answer(request) {
            Ok(input) => self
                .summarizer
                .summarize(&input)
                .await
                .map_err(AppError::from),
            Err(e) => Err(e),
        };
        self.settle("summarize_answer", SUMMARIZE_FAILED, outcome)
    }

    /// Failure envelope for an error raised before an action could run
    /// (undecodable body, invalid session).
    pub fn reject<T>(&self, action: &str, error: AppError) -> ActionResult<T> {
        self.settle(action, "Request failed.", Err(error))
    }

    fn settle<T>(
        &self,
        action: &str,
        fallback: &str,
        outcome: Result<T, AppError>,
    ) -> ActionResult<T> {
        match outcome {
            Ok(data) => ActionResult::Success(data),
            Err(e) => {
                info!(action, "Action failed: {e}");
                ActionResult::Failure(e.user_message(fallback, self.expose_backend_errors))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::interview::fixtures::{gateway_with, JD};
    use crate::llm_client::scripted::ScriptedBackend;
    use crate::llm_client::LlmError;

    fn generate(num_questions: i64) -> GenerateQuestionsRequest {
        GenerateQuestionsRequest {
            job_description: Some(JD.to_string()),
            num_questions: Some(num_questions),
            ..Default::default()
        }
    }

    #[test]
    fn test_success_envelope_shape() {
        let result = ActionResult::Success(CoachingFeedback {
            feedback: "Lead with the outcome.".to_string(),
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "data": { "feedback": "Lead with the outcome." } })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let result: ActionResult<CoachingFeedback> = ActionResult::Failure("nope".to_string());
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, serde_json::json!({ "success": false, "error": "nope" }));
    }

    #[tokio::test]
    async fn test_generate_questions_returns_exact_count() {
        let backend = Arc::new(ScriptedBackend::happy());
        let gateway = gateway_with(backend.clone());

        for n in [1, 3, 10] {
            let result = gateway.generate_questions(generate(n)).await;
            let questions = result.into_result().unwrap().questions;
            assert_eq!(questions.len(), n as usize);
            assert!(questions.iter().all(|q| !q.trim().is_empty()));
        }
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn test_out_of_range_count_never_reaches_backend() {
        let backend = Arc::new(ScriptedBackend::happy());
        let gateway = gateway_with(backend.clone());

        for n in [0, 11] {
            let result = gateway.generate_questions(generate(n)).await;
            assert!(!result.is_success());
            assert!(result.error().unwrap().starts_with("Invalid input: "));
        }
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_short_job_description_fails_every_capability_without_backend() {
        let backend = Arc::new(ScriptedBackend::happy());
        let gateway = gateway_with(backend.clone());
        let short = Some("Rust engineer wanted".to_string());

        let questions = gateway
            .generate_questions(GenerateQuestionsRequest {
                job_description: short.clone(),
                ..Default::default()
            })
            .await;
        let performance = gateway
            .analyze_performance(AnalyzePerformanceRequest {
                job_description: short.clone(),
                candidate_answers: Some(vec!["I built it.".to_string()]),
            })
            .await;
        let coaching = gateway
            .provide_coaching(ProvideCoachingRequest {
                job_description: short.clone(),
                interview_question: Some("Why?".to_string()),
                candidate_answer: Some("Because.".to_string()),
            })
            .await;
        let keywords = gateway
            .analyze_keyword_relevance(AnalyzeKeywordRelevanceRequest {
                job_description: short,
                candidate_answer: Some("Because.".to_string()),
            })
            .await;

        assert!(!questions.is_success());
        assert!(!performance.is_success());
        assert!(!coaching.is_success());
        assert!(!keywords.is_success());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_generic_error() {
        let backend = Arc::new(ScriptedBackend::new(|_| {
            Err(LlmError::Api {
                status: 500,
                message: "upstream stack trace: secret-host:4433".to_string(),
            })
        }));
        let gateway = gateway_with(backend);

        let result = gateway
            .provide_coaching(ProvideCoachingRequest {
                job_description: Some(JD.to_string()),
                interview_question: Some("Tell me about yourself.".to_string()),
                candidate_answer: Some("I build storage engines.".to_string()),
            })
            .await;

        assert_eq!(result.error(), Some(PROVIDE_COACHING_FAILED));
    }

    #[tokio::test]
    async fn test_backend_cause_included_when_exposed() {
        let backend = Arc::new(ScriptedBackend::new(|_| Ok("not json at all".to_string())));
        let client = AiClient::new(backend, Duration::from_secs(5));
        let gateway = ActionGateway::new(
            client,
            Arc::new(crate::interview::summarize::TruncatingSummarizer),
        )
        .with_backend_errors_exposed(true);

        let result = gateway
            .analyze_keyword_relevance(AnalyzeKeywordRelevanceRequest {
                job_description: Some(JD.to_string()),
                candidate_answer: Some("I used Kafka.".to_string()),
            })
            .await;

        let error = result.error().unwrap();
        assert!(error.starts_with(KEYWORD_RELEVANCE_FAILED));
        assert!(error.contains("JSON parse error"));
    }

    #[tokio::test]
    async fn test_malformed_output_is_failure_not_partial_success() {
        let backend = Arc::new(ScriptedBackend::new(|_| {
            Ok(r#"{"overallSentiment": "positive"}"#.to_string())
        }));
        let gateway = gateway_with(backend);

        let result = gateway
            .analyze_performance(AnalyzePerformanceRequest {
                job_description: Some(JD.to_string()),
                candidate_answers: Some(vec!["I shipped the feature.".to_string()]),
            })
            .await;

        assert!(!result.is_success());
        assert!(result.data().is_none());
    }

    #[tokio::test]
    async fn test_summarize_answer_uses_configured_summarizer() {
        let backend = Arc::new(ScriptedBackend::happy());
        let gateway = gateway_with(backend.clone());

        let result = gateway
            .summarize_answer(SummarizeAnswerRequest {
                answer_text: Some("I migrated our billing system to event sourcing.".to_string()),
            })
            .await;

        let summary = result.into_result().unwrap().summary;
        assert!(summary.contains("event sourcing"));
        assert_eq!(backend.calls(), 0, "truncating summarizer needs no model");
    }

    #[tokio::test]
    async fn test_summarize_rejects_short_text() {
        let gateway = gateway_with(Arc::new(ScriptedBackend::happy()));
        let result = gateway
            .summarize_answer(SummarizeAnswerRequest {
                answer_text: Some("short".to_string()),
            })
            .await;
        assert_eq!(
            result.error(),
            Some("Invalid input: Answer text is too short to summarize")
        );
    }

    #[test]
    fn test_decode_request_maps_type_errors_to_validation() {
        let body = serde_json::json!({ "jobDescription": JD, "numQuestions": "five" });
        let err = decode_request::<GenerateQuestionsRequest>(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
