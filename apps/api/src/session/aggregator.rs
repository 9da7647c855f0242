//! Session aggregator: turns a finished practice session into its feedback view.
//!
//! One performance analysis over every transcript, then coaching and keyword
//! relevance for each answer, all answers at once. A failed call leaves only
//! its own field empty; the rest of the view still settles.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::gateway::{ActionGateway, ActionResult};
use crate::interview::schema::{
    AnalyzeKeywordRelevanceRequest, AnalyzePerformanceRequest, CoachingFeedback,
    GenerateQuestionsRequest, KeywordRelevance, ProvideCoachingRequest, SentimentAnalysis,
    SummarizeAnswerRequest,
};
use crate::interview::validation::{FieldErrors, MAX_CANDIDATE_ANSWERS};
use crate::session::models::{InterviewSession, QuestionSet};

const DEFAULT_SESSION_TITLE: &str = "Mock Interview";

/// Overall feedback used when a session has no answers to analyze.
pub fn placeholder_overall() -> SentimentAnalysis {
    SentimentAnalysis {
        overall_sentiment: "N/A".to_string(),
        confidence_level: "N/A".to_string(),
        areas_for_improvement: "No answers submitted for overall analysis.".to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Review state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPhase {
    Idle,
    AnalyzingOverall,
    AnalyzingPerQuestion,
    Settled,
}

/// One answer merged with whatever feedback has been produced for it.
/// A `None` result next to a `Some` error means that call failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullFeedback {
    pub question_id: String,
    pub question_text: String,
    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub coaching: Option<CoachingFeedback>,
    pub keywords: Option<KeywordRelevance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coaching_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_error: Option<String>,
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_error: Option<String>,
}

/// Serializable snapshot of a review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub session_id: Uuid,
    pub title: String,
    pub phase: ReviewPhase,
    pub overall_feedback: Option<SentimentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_error: Option<String>,
    pub feedback: Vec<FullFeedback>,
    pub total_duration: u64,
}

/// The session object carried through aggregation and review.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    session: InterviewSession,
    phase: ReviewPhase,
    overall: Option<SentimentAnalysis>,
    overall_error: Option<String>,
    feedback: Vec<FullFeedback>,
}

impl ReviewSession {
    pub fn new(session: InterviewSession) -> Result<Self, AppError> {
        session.validate()?;
        if session.answers.len() > MAX_CANDIDATE_ANSWERS {
            return Err(AppError::Session(format!(
                "a session can have at most {MAX_CANDIDATE_ANSWERS} answers"
            )));
        }
        let mut errors = FieldErrors::default();
        errors.require_job_description(Some(session.job_description.clone()));
        errors.finish(())?;

        // Entries follow question order, not the order answers were recorded in.
        let feedback = session
            .questions
            .iter()
            .filter_map(|question| {
                let answer = session
                    .answers
                    .iter()
                    .find(|a| a.question_id == question.id)?;
                Some(FullFeedback {
                    question_id: question.id.clone(),
                    question_text: question.text.clone(),
                    transcript: answer.transcript.clone(),
                    audio_url: answer.audio_url.clone(),
                    duration: answer.duration,
                    coaching: None,
                    keywords: None,
                    coaching_error: None,
                    keyword_error: None,
                    summary: None,
                    summary_error: None,
                })
            })
            .collect();

        Ok(Self {
            session,
            phase: ReviewPhase::Idle,
            overall: None,
            overall_error: None,
            feedback,
        })
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> ReviewPhase {
        self.phase
    }

    #[allow(dead_code)]
    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    #[allow(dead_code)]
    pub fn overall(&self) -> Option<&SentimentAnalysis> {
        self.overall.as_ref()
    }

    #[allow(dead_code)]
    pub fn overall_error(&self) -> Option<&str> {
        self.overall_error.as_deref()
    }

    #[allow(dead_code)]
    pub fn feedback(&self) -> &[FullFeedback] {
        &self.feedback
    }

    #[allow(dead_code)]
    pub fn entry(&self, question_id: &str) -> Option<&FullFeedback> {
        self.feedback.iter().find(|f| f.question_id == question_id)
    }

    fn entry_mut(&mut self, question_id: &str) -> Result<&mut FullFeedback, AppError> {
        self.feedback
            .iter_mut()
            .find(|f| f.question_id == question_id)
            .ok_or_else(|| AppError::Session(format!("no answer for question '{question_id}'")))
    }

    /// Replaces an answer's transcript during review. Only that answer's
    /// summary is cleared; coaching and keyword results are kept as they were.
    #[allow(dead_code)]
    pub fn edit_transcript(&mut self, question_id: &str, transcript: &str) -> Result<(), AppError> {
        if self.phase != ReviewPhase::Settled {
            return Err(AppError::Session(
                "transcripts can only be edited once feedback has settled".to_string(),
            ));
        }

        let entry = self.entry_mut(question_id)?;
        entry.transcript = transcript.to_string();
        entry.summary = None;
        entry.summary_error = None;

        if let Some(answer) = self
            .session
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id)
        {
            answer.transcript = transcript.to_string();
        }
        Ok(())
    }

    /// Summarizes the current transcript of one answer on request.
    #[allow(dead_code)]
    pub async fn summarize(
        &mut self,
        question_id: &str,
        gateway: &ActionGateway,
    ) -> Result<&FullFeedback, AppError> {
        let transcript = self.entry_mut(question_id)?.transcript.clone();
        let result = gateway
            .summarize_answer(SummarizeAnswerRequest {
                answer_text: Some(transcript),
            })
            .await;

        let entry = self.entry_mut(question_id)?;
        match result.into_result() {
            Ok(summary) => {
                entry.summary = Some(summary.summary);
                entry.summary_error = None;
            }
            Err(e) => {
                entry.summary = None;
                entry.summary_error = Some(e);
            }
        }
        Ok(entry)
    }

    pub fn view(&self) -> FeedbackView {
        FeedbackView {
            session_id: self.session.id,
            title: self.session.title.clone(),
            phase: self.phase,
            overall_feedback: self.overall.clone(),
            overall_error: self.overall_error.clone(),
            feedback: self.feedback.clone(),
            total_duration: self.session.total_duration(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

struct AnswerOutcome {
    question_id: String,
    coaching: ActionResult<CoachingFeedback>,
    keywords: ActionResult<KeywordRelevance>,
}

pub struct SessionAggregator {
    gateway: Arc<ActionGateway>,
}

impl SessionAggregator {
    pub fn new(gateway: Arc<ActionGateway>) -> Self {
        Self { gateway }
    }

    #[allow(dead_code)]
    pub fn gateway(&self) -> &ActionGateway {
        &self.gateway
    }

    /// Runs the overall analysis and the per-answer fan-out, leaving the
    /// review `Settled`. Individual call failures are recorded on the review.
    pub async fn analyze(&self, review: &mut ReviewSession) -> Result<(), AppError> {
        if review.phase != ReviewPhase::Idle {
            return Err(AppError::Session(
                "session has already been analyzed".to_string(),
            ));
        }

        let started = Instant::now();
        let session_id = review.session.id;
        let job_description = review.session.job_description.clone();
        info!(%session_id, answers = review.feedback.len(), "Analyzing session");

        review.phase = ReviewPhase::AnalyzingOverall;
        // Skipped questions are recorded with blank transcripts.
        let transcripts: Vec<String> = review
            .feedback
            .iter()
            .filter(|f| !f.transcript.trim().is_empty())
            .map(|f| f.transcript.clone())
            .collect();
        if transcripts.is_empty() {
            review.overall = Some(placeholder_overall());
        } else {
            let result = self
                .gateway
                .analyze_performance(AnalyzePerformanceRequest {
                    job_description: Some(job_description.clone()),
                    candidate_answers: Some(transcripts),
                })
                .await;
            match result.into_result() {
                Ok(analysis) => review.overall = Some(analysis),
                Err(e) => {
                    warn!(%session_id, "Overall analysis unavailable: {e}");
                    review.overall_error = Some(e);
                }
            }
        }

        review.phase = ReviewPhase::AnalyzingPerQuestion;
        let pending: Vec<(String, String, String)> = review
            .feedback
            .iter()
            .map(|f| {
                (
                    f.question_id.clone(),
                    f.question_text.clone(),
                    f.transcript.clone(),
                )
            })
            .collect();
        let outcomes = join_all(pending.into_iter().map(|(question_id, question, transcript)| {
            self.analyze_answer(&job_description, question_id, question, transcript)
        }))
        .await;

        let mut failures = 0usize;
        for outcome in outcomes {
            let entry = review.entry_mut(&outcome.question_id)?;
            match outcome.coaching.into_result() {
                Ok(coaching) => entry.coaching = Some(coaching),
                Err(e) => {
                    failures += 1;
                    entry.coaching_error = Some(e);
                }
            }
            match outcome.keywords.into_result() {
                Ok(keywords) => entry.keywords = Some(keywords),
                Err(e) => {
                    failures += 1;
                    entry.keyword_error = Some(e);
                }
            }
        }

        review.phase = ReviewPhase::Settled;
        info!(
            %session_id,
            failures,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Session feedback settled"
        );
        Ok(())
    }

    async fn analyze_answer(
        &self,
        job_description: &str,
        question_id: String,
        question: String,
        transcript: String,
    ) -> AnswerOutcome {
        let (coaching, keywords) = tokio::join!(
            self.gateway.provide_coaching(ProvideCoachingRequest {
                job_description: Some(job_description.to_string()),
                interview_question: Some(question),
                candidate_answer: Some(transcript.clone()),
            }),
            self.gateway
                .analyze_keyword_relevance(AnalyzeKeywordRelevanceRequest {
                    job_description: Some(job_description.to_string()),
                    candidate_answer: Some(transcript),
                }),
        );
        AnswerOutcome {
            question_id,
            coaching,
            keywords,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session start
// ────────────────────────────────────────────────────────────────────────────

/// A freshly generated session and the question set a caller may save from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedSession {
    pub session: InterviewSession,
    pub question_set: QuestionSet,
}

/// Generates questions and wraps them in a new session.
pub async fn start_session(
    gateway: &ActionGateway,
    request: GenerateQuestionsRequest,
) -> ActionResult<StartedSession> {
    let title = request
        .interview_title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_SESSION_TITLE)
        .to_string();
    let job_description = request
        .job_description
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    gateway.generate_questions(request).await.map(|output| {
        let session = InterviewSession::from_generated(title, job_description, output.questions);
        let question_set = QuestionSet::from_session(&session, None);
        StartedSession {
            session,
            question_set,
        }
    })
}
