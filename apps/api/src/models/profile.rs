//! Profile: the structured candidate record produced by extraction + optimization.
//!
//! Model output is never trusted as-is: `Profile::from_model_output` deserializes into a
//! raw shape, coerces it (trim, drop empties, dedup skills) and validates the invariants.
//! A `Profile` value therefore always satisfies them; there is no partially filled state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::strip_json_fences;

pub const MAX_ATS_SCORE: i64 = 100;

/// One schema field: name, JSON type, description. Drives the prompt's format instructions.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub json_type: &'static str,
    pub description: &'static str,
}

/// The nine fields every model response must carry, in display order.
pub const PROFILE_FIELDS: [FieldSpec; 9] = [
    FieldSpec {
        name: "name",
        json_type: "string",
        description: "Extracted full name of the candidate",
    },
    FieldSpec {
        name: "email",
        json_type: "string",
        description: "Extracted email address",
    },
    FieldSpec {
        name: "phone",
        json_type: "string",
        description: "Extracted phone number",
    },
    FieldSpec {
        name: "summary",
        json_type: "string",
        description: "ATS-optimized professional summary rewritten for the job description",
    },
    FieldSpec {
        name: "skills",
        json_type: "array of strings",
        description: "Technical skills matching the job description, one distinct skill per element",
    },
    FieldSpec {
        name: "experience",
        json_type: "array of strings",
        description: "Impactful experience bullet points in action + result form",
    },
    FieldSpec {
        name: "education",
        json_type: "array of strings",
        description: "Extracted education history, one entry per credential",
    },
    FieldSpec {
        name: "ats_score",
        json_type: "integer",
        description: "ATS match score from 0 to 100",
    },
    FieldSpec {
        name: "optimization_points",
        json_type: "array of strings",
        description: "List of specific improvements made to the resume",
    },
];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model response was empty")]
    EmptyResponse,

    #[error("model response does not match the profile schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("extracted candidate name is empty")]
    EmptyName,

    #[error("ats_score {0} is outside 0..=100")]
    ScoreOutOfRange(i64),
}

/// ATS match score, guaranteed to be within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AtsScore(u8);

impl AtsScore {
    pub fn value(self) -> u8 {
        self.0
    }

    /// Display form used by the presentation layer, e.g. "82%".
    pub fn display(self) -> String {
        format!("{}%", self.0)
    }
}

impl TryFrom<i64> for AtsScore {
    type Error = ParseError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if (0..=MAX_ATS_SCORE).contains(&raw) {
            Ok(AtsScore(raw as u8))
        } else {
            Err(ParseError::ScoreOutOfRange(raw))
        }
    }
}

/// Shape of the model response before coercion. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawProfile {
    name: String,
    email: String,
    phone: String,
    summary: String,
    skills: Vec<String>,
    experience: Vec<String>,
    education: Vec<String>,
    ats_score: i64,
    optimization_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub ats_score: AtsScore,
    pub optimization_points: Vec<String>,
}

impl Profile {
    /// Parses raw model text into a validated `Profile`.
    ///
    /// Markdown code fences are tolerated. Anything else that does not fit the
    /// nine-field shape is a `ParseError`.
    pub fn from_model_output(text: &str) -> Result<Self, ParseError> {
        let text = strip_json_fences(text);
        if text.is_empty() {
            return Err(ParseError::EmptyResponse);
        }
        let raw: RawProfile = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Suggested download name, e.g. `Jane Doe_Resume.pdf`.
    pub fn document_file_name(&self) -> String {
        format!("{}_Resume.pdf", sanitize_file_stem(&self.name))
    }

    fn from_raw(raw: RawProfile) -> Result<Self, ParseError> {
        let name = raw.name.trim().to_string();
        if name.is_empty() {
            return Err(ParseError::EmptyName);
        }
        let ats_score = AtsScore::try_from(raw.ats_score)?;

        Ok(Profile {
            name,
            email: raw.email.trim().to_string(),
            phone: raw.phone.trim().to_string(),
            summary: raw.summary.trim().to_string(),
            skills: dedup_case_insensitive(clean_list(raw.skills)),
            experience: clean_list(raw.experience),
            education: clean_list(raw.education),
            ats_score,
            optimization_points: clean_list(raw.optimization_points),
        })
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

/// Replaces characters that are unsafe in a download file name.
fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "Candidate".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const JANE_DOE_JSON: &str = r#"{
        "name": "Jane Doe",
        "email": "jane@x.com",
        "phone": "555-1234",
        "summary": "Backend engineer focused on Python services.",
        "skills": ["Python", "APIs"],
        "experience": ["Built API serving 1M req/day"],
        "education": ["B.S. Computer Science"],
        "ats_score": 82,
        "optimization_points": ["Added quantifiable metric"]
    }"#;

    pub(crate) fn jane_doe() -> Profile {
        Profile::from_model_output(JANE_DOE_JSON).unwrap()
    }

    fn with_field(field: &str, value: serde_json::Value) -> String {
        let mut json: serde_json::Value = serde_json::from_str(JANE_DOE_JSON).unwrap();
        json[field] = value;
        json.to_string()
    }

    #[test]
    fn test_parses_example_profile() {
        let profile = jane_doe();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@x.com");
        assert_eq!(profile.skills, vec!["Python", "APIs"]);
        assert_eq!(profile.ats_score.value(), 82);
        assert_eq!(profile.ats_score.display(), "82%");
    }

    #[test]
    fn test_fenced_output_is_accepted() {
        let fenced = format!("```json\n{JANE_DOE_JSON}\n```");
        assert_eq!(Profile::from_model_output(&fenced).unwrap(), jane_doe());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let mut json: serde_json::Value = serde_json::from_str(JANE_DOE_JSON).unwrap();
        json.as_object_mut().unwrap().remove("education");
        let err = Profile::from_model_output(&json.to_string()).unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
        assert!(err.to_string().contains("education"));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let text = with_field("skills", serde_json::json!("Python, APIs"));
        assert!(matches!(
            Profile::from_model_output(&text),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_fractional_score_is_parse_error() {
        let text = with_field("ats_score", serde_json::json!(82.5));
        assert!(matches!(
            Profile::from_model_output(&text),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_score_above_range_is_rejected() {
        let text = with_field("ats_score", serde_json::json!(101));
        assert!(matches!(
            Profile::from_model_output(&text),
            Err(ParseError::ScoreOutOfRange(101))
        ));
    }

    #[test]
    fn test_negative_score_is_rejected() {
        let text = with_field("ats_score", serde_json::json!(-1));
        assert!(matches!(
            Profile::from_model_output(&text),
            Err(ParseError::ScoreOutOfRange(-1))
        ));
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        for score in [0, 100] {
            let text = with_field("ats_score", serde_json::json!(score));
            let profile = Profile::from_model_output(&text).unwrap();
            assert_eq!(i64::from(profile.ats_score.value()), score);
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let text = with_field("name", serde_json::json!("   "));
        assert!(matches!(
            Profile::from_model_output(&text),
            Err(ParseError::EmptyName)
        ));
    }

    #[test]
    fn test_empty_response_is_rejected() {
        assert!(matches!(
            Profile::from_model_output("  \n "),
            Err(ParseError::EmptyResponse)
        ));
    }

    #[test]
    fn test_lists_are_trimmed_and_skills_deduplicated() {
        let text = with_field(
            "skills",
            serde_json::json!([" Python ", "APIs", "python", "", "Docker"]),
        );
        let profile = Profile::from_model_output(&text).unwrap();
        assert_eq!(profile.skills, vec!["Python", "APIs", "Docker"]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let text = with_field("confidence", serde_json::json!("high"));
        assert_eq!(Profile::from_model_output(&text).unwrap(), jane_doe());
    }

    #[test]
    fn test_unicode_name_is_preserved() {
        let text = with_field("name", serde_json::json!("José Álvarez"));
        let profile = Profile::from_model_output(&text).unwrap();
        assert_eq!(profile.name, "José Álvarez");
        assert_eq!(profile.document_file_name(), "José Álvarez_Resume.pdf");
    }

    #[test]
    fn test_file_name_strips_path_separators() {
        let text = with_field("name", serde_json::json!("../etc/passwd"));
        let profile = Profile::from_model_output(&text).unwrap();
        assert_eq!(profile.document_file_name(), ".._etc_passwd_Resume.pdf");
    }

    #[test]
    fn test_schema_table_covers_every_field() {
        let names: Vec<&str> = PROFILE_FIELDS.iter().map(|f| f.name).collect();
        for field in [
            "name",
            "email",
            "phone",
            "summary",
            "skills",
            "experience",
            "education",
            "ats_score",
            "optimization_points",
        ] {
            assert!(names.contains(&field), "missing {field}");
        }
    }
}
