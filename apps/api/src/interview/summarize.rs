//! Summarization as a pluggable capability behind the same gateway contract.
//!
//! `TruncatingSummarizer` needs no model and is the default. `ModelSummarizer`
//! runs the `SummarizeAnswer` flow through the shared AI client.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::interview::flows::{Flow, SummarizeAnswer};
use crate::interview::schema::{AnswerSummary, SummarizeAnswerInput};
use crate::llm_client::{AiClient, LlmError};

const SUMMARY_WORD_LIMIT: usize = 15;
const SUMMARY_PREFIX: &str = "Key points: ";

#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn summarize(&self, input: &SummarizeAnswerInput) -> Result<AnswerSummary, LlmError>;
}

/// Deterministic summary: the answer's first words, marked when cut short.
pub struct TruncatingSummarizer;

#[async_trait]
impl Summarizer for TruncatingSummarizer {
    fn name(&self) -> &'static str {
        "truncate"
    }

    async fn summarize(&self, input: &SummarizeAnswerInput) -> Result<AnswerSummary, LlmError> {
        Ok(AnswerSummary {
            summary: truncate_words(&input.answer_text),
        })
    }
}

fn truncate_words(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > SUMMARY_WORD_LIMIT {
        format!("{SUMMARY_PREFIX}{}...", words[..SUMMARY_WORD_LIMIT].join(" "))
    } else {
        format!("{SUMMARY_PREFIX}{}", words.join(" "))
    }
}

pub struct ModelSummarizer {
    flow: Flow<SummarizeAnswer>,
}

impl ModelSummarizer {
    pub fn new(client: AiClient) -> Self {
        Self {
            flow: Flow::new(client),
        }
    }
}

#[async_trait]
impl Summarizer for ModelSummarizer {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn summarize(&self, input: &SummarizeAnswerInput) -> Result<AnswerSummary, LlmError> {
        self.flow.run(input).await
    }
}

/// Which summarizer backend to build at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummarizerKind {
    #[default]
    Truncate,
    Model,
}

impl FromStr for SummarizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truncate" | "truncating" => Ok(SummarizerKind::Truncate),
            "model" | "llm" => Ok(SummarizerKind::Model),
            other => Err(format!("Unknown summarizer: {other}")),
        }
    }
}

pub fn build_summarizer(kind: SummarizerKind, client: AiClient) -> Arc<dyn Summarizer> {
    match kind {
        SummarizerKind::Truncate => Arc::new(TruncatingSummarizer),
        SummarizerKind::Model => Arc::new(ModelSummarizer::new(client)),
    }
}
