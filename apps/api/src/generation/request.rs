//! Optimization request builder: résumé text + job description -> one prompt.
//!
//! Format instructions are generated from `PROFILE_FIELDS`, so adding or renaming a
//! field on `Profile` changes the prompt with it.

use serde_json::{Map, Value};

use crate::generation::prompts::{JD_SECTION_HEADER, OPTIMIZE_PROMPT_TEMPLATE, RESUME_SECTION_HEADER};
use crate::llm_client::prompts::FIDELITY_INSTRUCTION;
use crate::models::profile::PROFILE_FIELDS;

/// Builds the single optimization prompt. Both inputs are embedded verbatim; callers
/// guarantee they are non-empty.
pub fn build_optimization_prompt(resume_text: &str, job_description: &str) -> String {
    let instructions = OPTIMIZE_PROMPT_TEMPLATE
        .replace("{fidelity_instruction}", FIDELITY_INSTRUCTION)
        .replace("{format_instructions}", &format_instructions());

    // User text is appended, not substituted, so braces inside it are never expanded.
    format!(
        "{instructions}\n\n{RESUME_SECTION_HEADER}\n{resume_text}\n\n{JD_SECTION_HEADER}\n{job_description}\n"
    )
}

/// JSON object skeleton: each field maps to "<type>: <description>".
pub fn format_instructions() -> String {
    let mut skeleton = Map::new();
    for field in PROFILE_FIELDS.iter() {
        skeleton.insert(
            field.name.to_string(),
            Value::String(format!("{}: {}", field.json_type, field.description)),
        );
    }
    let skeleton =
        serde_json::to_string_pretty(&Value::Object(skeleton)).unwrap_or_else(|_| "{}".into());

    format!(
        "Return a single JSON object with EXACTLY these {} keys. Each value below describes \
         the type and content expected for that key:\n{skeleton}",
        PROFILE_FIELDS.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_inputs_verbatim() {
        let resume = "Jane Doe\njane@x.com\n  Built API serving 1M req/day  ";
        let jd = "Senior Python engineer; must know FastAPI.";
        let prompt = build_optimization_prompt(resume, jd);
        assert!(prompt.contains(resume));
        assert!(prompt.contains(jd));
        let resume_at = prompt.find(RESUME_SECTION_HEADER).unwrap();
        let jd_at = prompt.find(JD_SECTION_HEADER).unwrap();
        assert!(resume_at < jd_at);
    }

    #[test]
    fn test_prompt_lists_every_profile_field() {
        let prompt = build_optimization_prompt("resume", "jd");
        for field in PROFILE_FIELDS.iter() {
            assert!(
                prompt.contains(&format!("\"{}\"", field.name)),
                "missing field {}",
                field.name
            );
            assert!(prompt.contains(field.description));
        }
    }

    #[test]
    fn test_placeholders_are_filled() {
        let prompt = build_optimization_prompt("resume", "jd");
        assert!(!prompt.contains("{format_instructions}"));
        assert!(!prompt.contains("{fidelity_instruction}"));
        assert!(prompt.contains("never invent"));
    }

    #[test]
    fn test_braces_in_user_text_are_left_alone() {
        let resume = "Knows {format_instructions} templating";
        let prompt = build_optimization_prompt(resume, "{fidelity_instruction}");
        assert!(prompt.contains(resume));
        assert!(prompt.ends_with("{fidelity_instruction}\n"));
    }

    #[test]
    fn test_long_resume_is_not_chunked() {
        let resume = "x".repeat(50_000);
        let prompt = build_optimization_prompt(&resume, "jd");
        assert!(prompt.contains(&resume));
    }

    #[test]
    fn test_format_instructions_are_valid_json_skeleton() {
        let text = format_instructions();
        let start = text.find('{').unwrap();
        let value: Value = serde_json::from_str(&text[start..]).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 9);
        assert!(object["ats_score"].as_str().unwrap().starts_with("integer"));
        assert!(object["skills"]
            .as_str()
            .unwrap()
            .starts_with("array of strings"));
    }
}
