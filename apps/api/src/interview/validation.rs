//! Input validation for the action gateway.
//!
//! Each `validate_*` function turns an untrusted request into the capability's
//! input type, collecting every field error before failing so the caller sees
//! the whole list at once.

use crate::errors::AppError;
use crate::interview::resume::resume_text_from_data_uri;
use crate::interview::schema::{
    AnalyzeKeywordRelevanceInput, AnalyzeKeywordRelevanceRequest, AnalyzePerformanceInput,
    AnalyzePerformanceRequest, GenerateQuestionsInput, GenerateQuestionsRequest,
    ProvideCoachingInput, ProvideCoachingRequest, SummarizeAnswerInput, SummarizeAnswerRequest,
    DEFAULT_NUM_QUESTIONS, MAX_NUM_QUESTIONS, MIN_NUM_QUESTIONS,
};

pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 5000;
pub const MIN_TITLE_CHARS: usize = 5;
pub const MAX_TITLE_CHARS: usize = 100;
pub const MIN_SUMMARY_SOURCE_CHARS: usize = 10;
pub const MAX_CANDIDATE_ANSWERS: usize = 50;

/// Accumulates field errors for one request.
#[derive(Debug, Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Returns the trimmed value, recording an error when it is missing or blank.
    pub fn require_text(&mut self, label: &str, value: Option<String>) -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                self.push(format!("{label} is required"));
                String::new()
            }
        }
    }

    /// Job descriptions share the same bounds across every capability.
    pub fn require_job_description(&mut self, value: Option<String>) -> String {
        let text = self.require_text("Job description", value);
        if text.is_empty() {
            return text;
        }
        let len = text.chars().count();
        if len < MIN_JOB_DESCRIPTION_CHARS {
            self.push(format!(
                "Job description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters"
            ));
        } else if len > MAX_JOB_DESCRIPTION_CHARS {
            self.push(format!(
                "Job description must not exceed {MAX_JOB_DESCRIPTION_CHARS} characters"
            ));
        }
        text
    }

    /// Fails with every collected message, or hands back `value`.
    pub fn finish<T>(self, value: T) -> Result<T, AppError> {
        if self.messages.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self.messages.join(", ")))
        }
    }
}

pub fn validate_generate_questions(
    request: GenerateQuestionsRequest,
) -> Result<GenerateQuestionsInput, AppError> {
    let mut errors = FieldErrors::default();

    let job_description = errors.require_job_description(request.job_description);

    let num_questions = match request.num_questions {
        None => DEFAULT_NUM_QUESTIONS,
        Some(n) if (MIN_NUM_QUESTIONS as i64..=MAX_NUM_QUESTIONS as i64).contains(&n) => n as u8,
        Some(_) => {
            errors.push(format!(
                "Number of questions must be between {MIN_NUM_QUESTIONS} and {MAX_NUM_QUESTIONS}"
            ));
            DEFAULT_NUM_QUESTIONS
        }
    };

    if let Some(title) = request.interview_title.as_deref().map(str::trim) {
        let len = title.chars().count();
        if len < MIN_TITLE_CHARS {
            errors.push(format!("Title must be at least {MIN_TITLE_CHARS} characters"));
        } else if len > MAX_TITLE_CHARS {
            errors.push(format!("Title cannot exceed {MAX_TITLE_CHARS} characters"));
        }
    }

    let resume_text = match request.resume_data_uri.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(uri) => match resume_text_from_data_uri(uri) {
            Ok(text) => Some(text),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        },
    };

    errors.finish(GenerateQuestionsInput {
        job_description,
        num_questions,
        resume_text,
    })
}

pub fn validate_analyze_performance(
    request: AnalyzePerformanceRequest,
) -> Result<AnalyzePerformanceInput, AppError> {
    let mut errors = FieldErrors::default();

    let job_description = errors.require_job_description(request.job_description);

    let candidate_answers = request.candidate_answers.unwrap_or_default();
    if candidate_answers.is_empty() {
        errors.push("At least one candidate answer is required");
    } else if candidate_answers.len() > MAX_CANDIDATE_ANSWERS {
        errors.push(format!(
            "No more than {MAX_CANDIDATE_ANSWERS} candidate answers can be analyzed at once"
        ));
    }
    for (i, answer) in candidate_answers.iter().enumerate() {
        if answer.trim().is_empty() {
            errors.push(format!("Candidate answer {} is empty", i + 1));
        }
    }

    errors.finish(AnalyzePerformanceInput {
        job_description,
        candidate_answers: candidate_answers
            .into_iter()
            .map(|a| a.trim().to_string())
            .collect(),
    })
}

pub fn validate_provide_coaching(
    request: ProvideCoachingRequest,
) -> Result<ProvideCoachingInput, AppError> {
    let mut errors = FieldErrors::default();

    let job_description = errors.require_job_description(request.job_description);
    let interview_question = errors.require_text("Interview question", request.interview_question);
    let candidate_answer = errors.require_text("Candidate answer", request.candidate_answer);

    errors.finish(ProvideCoachingInput {
        job_description,
        interview_question,
        candidate_answer,
    })
}

pub fn validate_analyze_keyword_relevance(
    request: AnalyzeKeywordRelevanceRequest,
) -> Result<AnalyzeKeywordRelevanceInput, AppError> {
    let mut errors = FieldErrors::default();

    let job_description = errors.require_job_description(request.job_description);
    let candidate_answer = errors.require_text("Candidate answer", request.candidate_answer);

    errors.finish(AnalyzeKeywordRelevanceInput {
        job_description,
        candidate_answer,
    })
}

pub fn validate_summarize_answer(
    request: SummarizeAnswerRequest,
) -> Result<SummarizeAnswerInput, AppError> {
    let mut errors = FieldErrors::default();

    let answer_text = errors.require_text("Answer text", request.answer_text);
    if !answer_text.is_empty() && answer_text.chars().count() < MIN_SUMMARY_SOURCE_CHARS {
        errors.push("Answer text is too short to summarize");
    }

    errors.finish(SummarizeAnswerInput { answer_text })
}
