//! Prompt template renderer.
//!
//! Rendering is pure: the same input always produces byte-identical prompts.
//! User-supplied text (job descriptions, resumes, answers) is inserted verbatim
//! and never scanned for placeholders, so `{job_description}` or `{{handlebars}}`
//! typed by a user comes out exactly as typed.

use crate::interview::prompts::{
    COACHING_OUTPUT_SHAPE, COACHING_PROMPT_TEMPLATE, COACHING_ROLE, KEYWORD_OUTPUT_SHAPE,
    KEYWORD_PROMPT_TEMPLATE, KEYWORD_ROLE, PERFORMANCE_OUTPUT_SHAPE, PERFORMANCE_PROMPT_TEMPLATE,
    PERFORMANCE_ROLE, QUESTIONS_OUTPUT_SHAPE, QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_ROLE,
    RESUME_SECTION_TEMPLATE, SUMMARY_OUTPUT_SHAPE, SUMMARY_PROMPT_TEMPLATE, SUMMARY_ROLE,
};
use crate::interview::schema::{
    AnalyzeKeywordRelevanceInput, AnalyzePerformanceInput, GenerateQuestionsInput,
    ProvideCoachingInput, SummarizeAnswerInput,
};
use crate::llm_client::prompts::system_prompt;

/// System + user text for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub prompt: String,
}

/// Substitutes `{name}` placeholders in `template` in a single left-to-right pass.
///
/// Only names listed in `vars` are replaced; any other brace text (JSON examples,
/// unknown names) is copied through unchanged.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let name_len = after
            .bytes()
            .take_while(|b| b.is_ascii_lowercase() || *b == b'_')
            .count();
        let closed = name_len > 0 && after.as_bytes().get(name_len) == Some(&b'}');
        let value = if closed {
            let name = &after[..name_len];
            vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
        } else {
            None
        };

        match value {
            Some(value) => {
                out.push_str(value);
                rest = &after[name_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn render_generate_questions(input: &GenerateQuestionsInput) -> RenderedPrompt {
    let resume_section = input
        .resume_text
        .as_deref()
        .map(|text| render_template(RESUME_SECTION_TEMPLATE, &[("resume_text", text)]))
        .unwrap_or_default();
    let num_questions = input.num_questions.to_string();

    RenderedPrompt {
        system: system_prompt(QUESTIONS_ROLE, QUESTIONS_OUTPUT_SHAPE),
        prompt: render_template(
            QUESTIONS_PROMPT_TEMPLATE,
            &[
                ("resume_section", &resume_section),
                ("job_description", &input.job_description),
                ("num_questions", &num_questions),
            ],
        ),
    }
}

pub fn render_analyze_performance(input: &AnalyzePerformanceInput) -> RenderedPrompt {
    let candidate_answers = input
        .candidate_answers
        .iter()
        .map(|answer| format!("- {answer}"))
        .collect::<Vec<_>>()
        .join("\n");

    RenderedPrompt {
        system: system_prompt(PERFORMANCE_ROLE, PERFORMANCE_OUTPUT_SHAPE),
        prompt: render_template(
            PERFORMANCE_PROMPT_TEMPLATE,
            &[
                ("job_description", &input.job_description),
                ("candidate_answers", &candidate_answers),
            ],
        ),
    }
}

pub fn render_provide_coaching(input: &ProvideCoachingInput) -> RenderedPrompt {
    RenderedPrompt {
        system: system_prompt(COACHING_ROLE, COACHING_OUTPUT_SHAPE),
        prompt: render_template(
            COACHING_PROMPT_TEMPLATE,
            &[
                ("job_description", &input.job_description),
                ("interview_question", &input.interview_question),
                ("candidate_answer", &input.candidate_answer),
            ],
        ),
    }
}

pub fn render_analyze_keyword_relevance(input: &AnalyzeKeywordRelevanceInput) -> RenderedPrompt {
    RenderedPrompt {
        system: system_prompt(KEYWORD_ROLE, KEYWORD_OUTPUT_SHAPE),
        prompt: render_template(
            KEYWORD_PROMPT_TEMPLATE,
            &[
                ("job_description", &input.job_description),
                ("candidate_answer", &input.candidate_answer),
            ],
        ),
    }
}

pub fn render_summarize_answer(input: &SummarizeAnswerInput) -> RenderedPrompt {
    RenderedPrompt {
        system: system_prompt(SUMMARY_ROLE, SUMMARY_OUTPUT_SHAPE),
        prompt: render_template(SUMMARY_PROMPT_TEMPLATE, &[("answer_text", &input.answer_text)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::fixtures::JD;

    fn questions_input(resume_text: Option<&str>) -> GenerateQuestionsInput {
        GenerateQuestionsInput {
            job_description: JD.to_string(),
            num_questions: 3,
            resume_text: resume_text.map(str::to_string),
        }
    }

    /// Any `{snake_case}` name left in a rendered prompt means a template var was missed.
    fn assert_no_placeholders(text: &str) {
        for name in [
            "resume_section",
            "resume_text",
            "job_description",
            "num_questions",
            "candidate_answers",
            "candidate_answer",
            "interview_question",
            "answer_text",
        ] {
            assert!(
                !text.contains(&format!("{{{name}}}")),
                "unrendered placeholder {name} in:\n{text}"
            );
        }
    }

    #[test]
    fn test_render_template_substitutes_known_names() {
        let out = render_template("Hello {name}, you are {age}.", &[("name", "Ada"), ("age", "36")]);
        assert_eq!(out, "Hello Ada, you are 36.");
    }

    #[test]
    fn test_render_template_leaves_json_and_unknown_names() {
        let template = r#"{"key": "{value}"} and {unknown} and {Upper} and {"#;
        let out = render_template(template, &[("value", "v")]);
        assert_eq!(out, r#"{"key": "v"} and {unknown} and {Upper} and {"#);
    }

    #[test]
    fn test_render_template_does_not_rescan_inserted_values() {
        let out = render_template(
            "{first} / {second}",
            &[("first", "{second}"), ("second", "two")],
        );
        assert_eq!(out, "{second} / two");
    }

    #[test]
    fn test_render_template_handles_multibyte_text_around_braces() {
        let out = render_template("résumé → {name} ✓", &[("name", "Zoë")]);
        assert_eq!(out, "résumé → Zoë ✓");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let input = questions_input(Some("Led the payments team."));
        let first = render_generate_questions(&input);
        let second = render_generate_questions(&input);
        assert_eq!(first, second);
        assert_eq!(first.prompt.as_bytes(), second.prompt.as_bytes());
    }

    #[test]
    fn test_resume_section_only_when_resume_present() {
        let without = render_generate_questions(&questions_input(None));
        assert!(!without.prompt.contains("CANDIDATE'S RESUME"));

        let with = render_generate_questions(&questions_input(Some("Built a Kafka connector.")));
        assert!(with.prompt.contains("CANDIDATE'S RESUME:\nBuilt a Kafka connector."));
        assert!(with.prompt.contains("tailor some questions"));
    }

    #[test]
    fn test_question_count_is_rendered() {
        let rendered = render_generate_questions(&questions_input(None));
        assert!(rendered.prompt.contains("Please generate 3 interview questions"));
        assert!(rendered.system.contains(r#""questions""#));
    }

    #[test]
    fn test_template_syntax_in_job_description_is_verbatim() {
        let hostile = format!(
            "{JD} {{{{handlebars}}}} {{{{#each x}}}} {{num_questions}} {{resume_section}} <script>alert(1)</script>"
        );
        let input = GenerateQuestionsInput {
            job_description: hostile.clone(),
            num_questions: 2,
            resume_text: None,
        };
        let rendered = render_generate_questions(&input);
        assert!(rendered.prompt.contains(&hostile));
        // The real count still renders where the template asks for it
        assert!(rendered.prompt.contains("Please generate 2 interview questions"));
    }

    #[test]
    fn test_template_syntax_in_answer_is_verbatim() {
        let answer = "I used {{{this}}} and {candidate_answer} in prod";
        let rendered = render_provide_coaching(&ProvideCoachingInput {
            job_description: JD.to_string(),
            interview_question: "What did you use?".to_string(),
            candidate_answer: answer.to_string(),
        });
        assert!(rendered.prompt.contains(answer));
        assert_eq!(rendered.prompt.matches(answer).count(), 1);
    }

    #[test]
    fn test_performance_prompt_enumerates_answers_in_order() {
        let rendered = render_analyze_performance(&AnalyzePerformanceInput {
            job_description: JD.to_string(),
            candidate_answers: vec!["First answer".to_string(), "Second answer".to_string()],
        });
        let first = rendered.prompt.find("- First answer").unwrap();
        let second = rendered.prompt.find("- Second answer").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_all_prompts_render_without_leftover_placeholders() {
        let prompts = [
            render_generate_questions(&questions_input(Some("Resume text"))),
            render_analyze_performance(&AnalyzePerformanceInput {
                job_description: JD.to_string(),
                candidate_answers: vec!["An answer".to_string()],
            }),
            render_provide_coaching(&ProvideCoachingInput {
                job_description: JD.to_string(),
                interview_question: "Q".to_string(),
                candidate_answer: "A".to_string(),
            }),
            render_analyze_keyword_relevance(&AnalyzeKeywordRelevanceInput {
                job_description: JD.to_string(),
                candidate_answer: "A".to_string(),
            }),
            render_summarize_answer(&SummarizeAnswerInput {
                answer_text: "A long enough answer".to_string(),
            }),
        ];
        for rendered in &prompts {
            assert_no_placeholders(&rendered.prompt);
            assert!(rendered.system.contains("valid JSON only"));
        }
    }
}
