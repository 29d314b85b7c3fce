//! Response Parser: pulls the JSON object out of free-form completion text.
//!
//! Extraction is a heuristic: the slice from the first `{` to the last `}` is
//! taken as the object. It assumes the model emitted exactly one JSON object;
//! unrelated braces in surrounding commentary, several objects, or truncated
//! output all end up as a parse failure rather than a best guess.

use serde::de::DeserializeOwned;

use crate::llm_client::GenerationError;
use crate::models::resume::GeneratedContent;

/// Returns the slice spanning the first `{` through the last `}`.
pub fn extract_json_object(text: &str) -> Result<&str, GenerationError> {
    let start = text.find('{').ok_or(GenerationError::NoJsonObject)?;
    let end = text.rfind('}').ok_or(GenerationError::NoJsonObject)?;
    if end < start {
        return Err(GenerationError::NoJsonObject);
    }
    Ok(&text[start..=end])
}

/// Extracts the embedded object and deserializes it into `T`.
pub fn parse_json_object<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let json = extract_json_object(text)?;
    Ok(serde_json::from_str(json)?)
}

/// Parses completion text into `GeneratedContent`. Missing keys default to
/// empty values; keys of the wrong type fail the whole parse.
pub fn parse_generated_content(text: &str) -> Result<GeneratedContent, GenerationError> {
    parse_json_object(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_extracts_object_from_commentary() {
        let raw = r#"Sure! Here you go: {"summary":"S","skills":["A"],"projects":[]} Hope that helps!"#;
        assert_eq!(
            extract_json_object(raw).unwrap(),
            r#"{"summary":"S","skills":["A"],"projects":[]}"#
        );
    }

    #[test]
    fn test_commentary_does_not_change_parsed_mapping() {
        let object = json!({
            "summary": "Backend engineer with a focus on reliability.",
            "skills": ["Python", "SQL", "Kafka"],
            "projects": [{"title": "X", "desc": "Y"}],
            "nested": {"depth": {"ok": true}}
        });
        let bare = object.to_string();

        for (prefix, suffix) in [
            ("", ""),
            ("Here is the JSON:\n```json\n", "\n```"),
            ("Of course.\n\n", "\n\nLet me know if you need changes."),
        ] {
            let wrapped = format!("{prefix}{bare}{suffix}");
            let parsed: Value = parse_json_object(&wrapped).unwrap();
            let alone: Value = parse_json_object(&bare).unwrap();
            assert_eq!(parsed, alone);
            assert_eq!(parsed, object);
        }
    }

    #[test]
    fn test_no_braces_is_extraction_failure() {
        let err = parse_generated_content("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, GenerationError::NoJsonObject));
    }

    #[test]
    fn test_closing_brace_before_opening_is_extraction_failure() {
        let err = extract_json_object("} stray then {").unwrap_err();
        assert!(matches!(err, GenerationError::NoJsonObject));
    }

    #[test]
    fn test_truncated_json_is_parse_failure() {
        let err = parse_generated_content(r#"{"summary": "S", "skills": ["A", "B"#).unwrap_err();
        assert!(matches!(err, GenerationError::NoJsonObject | GenerationError::Parse(_)));

        let err = parse_generated_content(r#"{"summary": "S", "skills": ["A"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_two_objects_is_parse_failure() {
        let err = parse_generated_content(r#"{"summary": "A"} and also {"summary": "B"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = r#"noise {"summary":"S","skills":["A"]} noise"#;
        let first = parse_generated_content(raw).unwrap();
        let second = parse_generated_content(raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_keys_default() {
        let content = parse_generated_content(r#"Result: {"summary":"S"}"#).unwrap();
        assert_eq!(content.summary, "S");
        assert!(content.skills.is_empty());
        assert!(content.projects.is_empty());
        assert!(content.suggestions.is_empty());
    }

    #[test]
    fn test_full_content_with_suggestions() {
        let raw = r#"{"summary":"S","skills":["Python","SQL"],"projects":[{"title":"X","desc":"Y"}],"suggestions":["Use a professional email"]}"#;
        let content = parse_generated_content(raw).unwrap();
        assert_eq!(content.skills, vec!["Python", "SQL"]);
        assert_eq!(content.projects[0].title, "X");
        assert_eq!(content.projects[0].desc, "Y");
        assert_eq!(content.suggestions, vec!["Use a professional email"]);
    }
}
