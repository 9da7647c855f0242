//! Prompt schema layer: request, input and output contracts for every capability.
//!
//! Three shapes per capability:
//! - `*Request`: untrusted JSON from the UI tier. Every field is optional so that
//!   missing values surface as validation messages, not deserialization failures.
//! - `*Input`: produced only by `interview::validation`; the flows accept nothing else.
//! - Output types: decoded from the model's JSON and checked before use.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_QUESTIONS: u8 = 5;
pub const MIN_NUM_QUESTIONS: u8 = 1;
pub const MAX_NUM_QUESTIONS: u8 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Raw requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub job_description: Option<String>,
    pub num_questions: Option<i64>,
    /// `data:<mimetype>;base64,<encoded_data>`
    pub resume_data_uri: Option<String>,
    pub interview_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzePerformanceRequest {
    pub job_description: Option<String>,
    pub candidate_answers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvideCoachingRequest {
    pub job_description: Option<String>,
    pub interview_question: Option<String>,
    pub candidate_answer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeKeywordRelevanceRequest {
    pub job_description: Option<String>,
    pub candidate_answer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeAnswerRequest {
    pub answer_text: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Validated inputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateQuestionsInput {
    pub job_description: String,
    pub num_questions: u8,
    /// Text extracted from the attached resume, if one was supplied.
    pub resume_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzePerformanceInput {
    pub job_description: String,
    pub candidate_answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvideCoachingInput {
    pub job_description: String,
    pub interview_question: String,
    pub candidate_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeKeywordRelevanceInput {
    pub job_description: String,
    pub candidate_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeAnswerInput {
    pub answer_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Outputs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateQuestionsOutput {
    pub questions: Vec<String>,
}

/// Overall performance analysis across all of a session's answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    pub overall_sentiment: String,
    pub confidence_level: String,
    pub areas_for_improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingFeedback {
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRelevance {
    pub relevance_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummary {
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Output checks
// ────────────────────────────────────────────────────────────────────────────

fn require_filled(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

impl GenerateQuestionsOutput {
    /// Requires exactly `expected` non-blank questions; trims each, keeps order.
    pub fn checked(self, expected: usize) -> Result<Self, String> {
        if self.questions.len() != expected {
            return Err(format!(
                "expected {expected} questions, model returned {}",
                self.questions.len()
            ));
        }
        let mut questions = Vec::with_capacity(expected);
        for (i, question) in self.questions.into_iter().enumerate() {
            require_filled(&format!("questions[{i}]"), &question)?;
            questions.push(question.trim().to_string());
        }
        Ok(Self { questions })
    }
}

impl SentimentAnalysis {
    pub fn checked(self) -> Result<Self, String> {
        require_filled("overallSentiment", &self.overall_sentiment)?;
        require_filled("confidenceLevel", &self.confidence_level)?;
        require_filled("areasForImprovement", &self.areas_for_improvement)?;
        Ok(self)
    }
}

impl CoachingFeedback {
    pub fn checked(self) -> Result<Self, String> {
        require_filled("feedback", &self.feedback)?;
        Ok(self)
    }
}

impl KeywordRelevance {
    pub fn checked(self) -> Result<Self, String> {
        require_filled("relevanceAnalysis", &self.relevance_analysis)?;
        Ok(self)
    }
}

impl AnswerSummary {
    pub fn checked(self) -> Result<Self, String> {
        require_filled("summary", &self.summary)?;
        Ok(self)
    }
}
