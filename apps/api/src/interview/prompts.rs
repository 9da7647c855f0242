// All LLM prompt templates for the interview capabilities.
// Placeholders are `{snake_case}` names filled by interview::render in a single
// pass; substituted text is never re-scanned for placeholders.

// ── Question generation ─────────────────────────────────────────────────────

pub const QUESTIONS_ROLE: &str = "You are an expert interview question generator.";

/// Replace: {resume_section}, {job_description}, {num_questions}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Your task is to generate a list of interview questions.
Prioritize questions that assess the candidate's suitability for the role described in the Job Description.
{resume_section}
JOB DESCRIPTION:
{job_description}

Please generate {num_questions} interview questions based on the provided information.
Return exactly {num_questions} questions, in the order they should be asked.
Do not include any introductory or concluding statements."#;

/// Rendered into {resume_section} only when a resume was attached.
/// Replace: {resume_text}
pub const RESUME_SECTION_TEMPLATE: &str = r#"Also, tailor some questions to explore the experiences, skills, and projects listed in the Candidate's Resume.

CANDIDATE'S RESUME:
{resume_text}
"#;

pub const QUESTIONS_OUTPUT_SHAPE: &str = r#"{
  "questions": ["Tell me about a time you ..."]
}"#;

// ── Performance analysis ────────────────────────────────────────────────────

pub const PERFORMANCE_ROLE: &str = "You are an AI-powered interview analyst. \
    Your task is to evaluate a candidate's performance based on their answers to interview questions, \
    considering their tone, confidence level, and the content of their responses.";

/// Replace: {job_description}, {candidate_answers}
pub const PERFORMANCE_PROMPT_TEMPLATE: &str = r#"JOB DESCRIPTION:
{job_description}

CANDIDATE ANSWERS:
{candidate_answers}

Analyze the candidate's performance and provide feedback in the following areas:
- Overall sentiment (positive, negative, neutral)
- Confidence level (high, medium, low)
- Areas for improvement (specific suggestions for better answers or delivery)"#;

pub const PERFORMANCE_OUTPUT_SHAPE: &str = r#"{
  "overallSentiment": "positive" | "negative" | "neutral",
  "confidenceLevel": "high" | "medium" | "low",
  "areasForImprovement": "Specific suggestions for better answers or delivery"
}"#;

// ── Coaching ────────────────────────────────────────────────────────────────

pub const COACHING_ROLE: &str =
    "You are an expert interview coach providing feedback to candidates.";

/// Replace: {job_description}, {interview_question}, {candidate_answer}
pub const COACHING_PROMPT_TEMPLATE: &str = r#"Based on the job description, interview question, and the candidate's answer, provide actionable and personalized advice on how to improve their response.
Offer specific suggestions for elaboration, conciseness, and example strengthening.

JOB DESCRIPTION:
{job_description}

INTERVIEW QUESTION:
{interview_question}

CANDIDATE'S ANSWER:
{candidate_answer}

Focus on how the candidate can:
* More effectively address the question.
* Strengthen their examples with more detail.
* Refine their delivery for better impact.
* Be more concise."#;

pub const COACHING_OUTPUT_SHAPE: &str = r#"{
  "feedback": "Personalized advice on how to improve the interview response"
}"#;

// ── Keyword relevance ───────────────────────────────────────────────────────

pub const KEYWORD_ROLE: &str = "You are an expert interview analyst.";

/// Replace: {job_description}, {candidate_answer}
pub const KEYWORD_PROMPT_TEMPLATE: &str = r#"Analyze the candidate's answer in terms of its relevance to the provided job description.
Highlight areas where the candidate effectively uses keywords and concepts from the job description, and identify areas where the candidate could better align their language with the job description.
Provide actionable feedback on how the candidate can improve their answer by incorporating key terms and concepts from the job description.

JOB DESCRIPTION:
{job_description}

CANDIDATE'S ANSWER:
{candidate_answer}"#;

pub const KEYWORD_OUTPUT_SHAPE: &str = r#"{
  "relevanceAnalysis": "Keyword and concept relevance of the answer, with areas for improvement"
}"#;

// ── Summarization ───────────────────────────────────────────────────────────

pub const SUMMARY_ROLE: &str =
    "You are an interview note-taker who condenses candidate answers.";

/// Replace: {answer_text}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize the candidate's answer below in two or three sentences.
Keep the key points the candidate made: actions taken, results, and technologies mentioned.

CANDIDATE'S ANSWER:
{answer_text}"#;

pub const SUMMARY_OUTPUT_SHAPE: &str = r#"{
  "summary": "Two or three sentence summary of the answer"
}"#;
