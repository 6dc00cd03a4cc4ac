// LLM prompt constants for résumé optimization.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role framing sent ahead of `llm_client::prompts::JSON_ONLY_SYSTEM`.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert technical recruiter and ATS \
    (Applicant Tracking System) specialist. You read a candidate's résumé and a target \
    job description, extract the candidate's contact details and history, and rewrite \
    the content so it matches the job description as closely as the résumé allows.";

/// Instruction block. Replace `{fidelity_instruction}` and `{format_instructions}`
/// before sending; the résumé and job description are appended after it.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"{fidelity_instruction}

Extract the candidate name, email, phone, and education from the résumé. Then optimize
the summary, skills and experience for the job description.

Rules:
- Copy name, email and phone exactly as written in the résumé.
- Experience entries are single bullet points: strong action verb, what was done, measurable result.
- Skills are short names (e.g. "Python", "PostgreSQL"), one per element, no duplicates.
- ats_score is a whole number from 0 to 100 estimating how well the optimized résumé matches the job description.
- optimization_points lists the concrete changes you made, one per element.

{format_instructions}"#;

pub const RESUME_SECTION_HEADER: &str = "RÉSUMÉ TEXT:";
pub const JD_SECTION_HEADER: &str = "JOB DESCRIPTION:";
