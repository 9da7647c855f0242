//! Flow orchestrators, one per capability.
//!
//! A flow is render → invoke → check, nothing more: no retries, no caching and
//! no state between calls, so one `Flow` can serve any number of concurrent
//! invocations.

use std::marker::PhantomData;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::interview::render::{
    render_analyze_keyword_relevance, render_analyze_performance, render_generate_questions,
    render_provide_coaching, render_summarize_answer, RenderedPrompt,
};
use crate::interview::schema::{
    AnalyzeKeywordRelevanceInput, AnalyzePerformanceInput, AnswerSummary, CoachingFeedback,
    GenerateQuestionsInput, GenerateQuestionsOutput, KeywordRelevance, ProvideCoachingInput,
    SentimentAnalysis, SummarizeAnswerInput,
};
use crate::llm_client::{AiClient, CompletionRequest, LlmError};

/// A named AI-backed operation with a fixed input and output contract.
pub trait Capability: Send + Sync + 'static {
    const NAME: &'static str;

    type Input: Send + Sync;
    type Output: DeserializeOwned + Send;

    fn render(input: &Self::Input) -> RenderedPrompt;

    /// Validates (and may normalize) decoded model output against the input it answers.
    fn check(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String>;
}

pub struct GenerateQuestions;
pub struct AnalyzePerformance;
pub struct ProvideCoaching;
pub struct AnalyzeKeywordRelevance;
pub struct SummarizeAnswer;

impl Capability for GenerateQuestions {
    const NAME: &'static str = "generate_questions";
    type Input = GenerateQuestionsInput;
    type Output = GenerateQuestionsOutput;

    fn render(input: &Self::Input) -> RenderedPrompt {
        render_generate_questions(input)
    }

    fn check(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        output.checked(input.num_questions as usize)
    }
}

impl Capability for AnalyzePerformance {
    const NAME: &'static str = "analyze_performance";
    type Input = AnalyzePerformanceInput;
    type Output = SentimentAnalysis;

    fn render(input: &Self::Input) -> RenderedPrompt {
        render_analyze_performance(input)
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        output.checked()
    }
}

impl Capability for ProvideCoaching {
    const NAME: &'static str = "provide_coaching";
    type Input = ProvideCoachingInput;
    type Output = CoachingFeedback;

    fn render(input: &Self::Input) -> RenderedPrompt {
        render_provide_coaching(input)
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        output.checked()
    }
}

impl Capability for AnalyzeKeywordRelevance {
    const NAME: &'static str = "analyze_keyword_relevance";
    type Input = AnalyzeKeywordRelevanceInput;
    type Output = KeywordRelevance;

    fn render(input: &Self::Input) -> RenderedPrompt {
        render_analyze_keyword_relevance(input)
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        output.checked()
    }
}

impl Capability for SummarizeAnswer {
    const NAME: &'static str = "summarize_answer";
    type Input = SummarizeAnswerInput;
    type Output = AnswerSummary;

    fn render(input: &Self::Input) -> RenderedPrompt {
        render_summarize_answer(input)
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        output.checked()
    }
}

/// Runs one capability against the shared AI client.
pub struct Flow<C: Capability> {
    client: AiClient,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability> Flow<C> {
    pub fn new(client: AiClient) -> Self {
        Self {
            client,
            _capability: PhantomData,
        }
    }

    pub async fn run(&self, input: &C::Input) -> Result<C::Output, LlmError> {
        let rendered = C::render(input);
        let request = CompletionRequest {
            capability: C::NAME,
            system: &rendered.system,
            prompt: &rendered.prompt,
        };

        let started = Instant::now();
        let result = self
            .client
            .invoke(&request, |output| C::check(input, output))
            .await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => info!(capability = C::NAME, elapsed_ms, "Flow completed"),
            Err(e) => warn!(capability = C::NAME, elapsed_ms, error = %e, "Flow failed"),
        }

        result
    }
}
