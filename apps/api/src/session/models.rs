use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const GENERATED_QUESTION_PREFIX: &str = "gen-q-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Questions from the generation flow are numbered from zero in output order.
    pub fn generated(index: usize, text: impl Into<String>) -> Self {
        Self::new(format!("{GENERATED_QUESTION_PREFIX}{index}"), text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Answer {
    #[allow(dead_code)]
    pub fn new(question_id: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            transcript: transcript.into(),
            audio_url: None,
            duration: None,
        }
    }
}

/// One practice run: a job description, its questions and the answers given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: Uuid,
    pub title: String,
    pub job_description: String,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
    pub created_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(
        title: impl Into<String>,
        job_description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            job_description: job_description.into(),
            questions,
            answers: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Builds a session from the generation flow's output, keeping its order.
    pub fn from_generated(
        title: impl Into<String>,
        job_description: impl Into<String>,
        texts: Vec<String>,
    ) -> Self {
        let questions = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Question::generated(i, text))
            .collect();
        Self::new(title, job_description, questions)
    }

    /// Total recorded time in seconds.
    pub fn total_duration(&self) -> u64 {
        self.answers
            .iter()
            .filter_map(|a| a.duration)
            .map(u64::from)
            .sum()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(AppError::Session(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }
        }

        let mut answered = HashSet::new();
        for answer in &self.answers {
            if !question_ids.contains(answer.question_id.as_str()) {
                return Err(AppError::Session(format!(
                    "answer references unknown question '{}'",
                    answer.question_id
                )));
            }
            if !answered.insert(answer.question_id.as_str()) {
                return Err(AppError::Session(format!(
                    "more than one answer for question '{}'",
                    answer.question_id
                )));
            }
        }
        Ok(())
    }
}

/// A reusable, named list of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description_context: Option<String>,
}

impl QuestionSet {
    pub fn from_session(session: &InterviewSession, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: session.title.clone(),
            description,
            questions: session.questions.clone(),
            created_at: Utc::now(),
            job_description_context: Some(session.job_description.clone()),
        }
    }
}

/// Body of `POST /api/v1/sessions/feedback`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedbackRequest {
    pub title: String,
    pub job_description: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl SessionFeedbackRequest {
    pub fn into_session(self) -> InterviewSession {
        let mut session = InterviewSession::new(self.title, self.job_description, self.questions);
        session.answers = self.answers;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> InterviewSession {
        InterviewSession::from_generated(
            "Backend loop",
            "jd",
            vec!["Why Rust?".to_string(), "Describe an outage.".to_string()],
        )
    }

    #[test]
    fn test_generated_questions_are_numbered_from_zero() {
        let s = session();
        let ids: Vec<_> = s.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["gen-q-0", "gen-q-1"]);
        assert_eq!(s.questions[1].text, "Describe an outage.");
    }

    #[test]
    fn test_total_duration_skips_missing_values() {
        let mut s = session();
        s.answers = vec![
            Answer {
                duration: Some(120),
                ..Answer::new("gen-q-0", "a")
            },
            Answer::new("gen-q-1", "b"),
        ];
        assert_eq!(s.total_duration(), 120);
    }

    #[test]
    fn test_total_duration_does_not_overflow() {
        let mut s = session();
        s.answers = vec![
            Answer {
                duration: Some(u32::MAX),
                ..Answer::new("gen-q-0", "a")
            },
            Answer {
                duration: Some(1),
                ..Answer::new("gen-q-1", "b")
            },
        ];
        assert_eq!(s.total_duration(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_answers() {
        let mut s = session();
        s.answers = vec![Answer::new("gen-q-0", "a"), Answer::new("gen-q-0", "b")];
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dangling_answer() {
        let mut s = session();
        s.answers = vec![Answer::new("q-unknown", "a")];
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_question_ids() {
        let s = InterviewSession::new(
            "Loop",
            "jd",
            vec![Question::new("q1", "A?"), Question::new("q1", "B?")],
        );
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_feedback_request_reads_camel_case() {
        let json = r#"{
            "title": "Loop",
            "jobDescription": "jd",
            "questions": [{"id": "q1", "text": "Why?"}],
            "answers": [{"questionId": "q1", "transcript": "Because.", "duration": 42}]
        }"#;
        let request: SessionFeedbackRequest = serde_json::from_str(json).unwrap();
        let s = request.into_session();
        assert_eq!(s.answers[0].duration, Some(42));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_question_set_keeps_job_description_context() {
        let set = QuestionSet::from_session(&session(), None);
        assert_eq!(set.name, "Backend loop");
        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.job_description_context.as_deref(), Some("jd"));
    }
}
