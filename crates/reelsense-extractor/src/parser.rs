//! Parse LLM output into metadata and sentiment records

use crate::error::ExtractorError;
use reelsense_domain::{MetadataRecord, SentimentRecord};
use serde_json::{Map, Value};

/// Top-level key holding the metadata object
pub const METADATA_KEY: &str = "metadata";

/// Top-level key holding the sentiment object
pub const SENTIMENT_KEY: &str = "sentiment";

/// Parse the raw collaborator response into its two records
///
/// Checks structure only; alignment is validated separately.
pub fn parse_llm_response(
    response: &str,
) -> Result<(MetadataRecord, SentimentRecord), ExtractorError> {
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| ExtractorError::malformed(format!("JSON parse error: {}", e), response))?;

    let root = json
        .as_object()
        .ok_or_else(|| ExtractorError::malformed("Expected JSON object", response))?;

    let missing: Vec<String> = [METADATA_KEY, SENTIMENT_KEY]
        .iter()
        .filter(|key| !root.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ExtractorError::IncompleteResponse { missing });
    }

    let metadata = parse_metadata(&root[METADATA_KEY], response)?;
    let sentiment = parse_sentiment(&root[SENTIMENT_KEY], response)?;

    Ok((metadata, sentiment))
}

/// Strip a markdown code fence if the model added one anyway
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);

    // Language tag, e.g. ```json
    body.trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

fn parse_metadata(value: &Value, raw: &str) -> Result<MetadataRecord, ExtractorError> {
    let obj = as_object(value, METADATA_KEY, raw)?;

    let mut record = MetadataRecord::new();
    for (field, value) in obj {
        let text = scalar_text(value).ok_or_else(|| {
            ExtractorError::malformed(
                format!("Metadata field '{}' is not a string", field),
                raw,
            )
        })?;
        record.insert(field.as_str(), text);
    }
    Ok(record)
}

fn parse_sentiment(value: &Value, raw: &str) -> Result<SentimentRecord, ExtractorError> {
    let obj = as_object(value, SENTIMENT_KEY, raw)?;

    if obj.len() != 1 {
        return Err(ExtractorError::malformed(
            format!("Sentiment must have exactly one key, found {}", obj.len()),
            raw,
        ));
    }

    // Length checked above
    let (key, value) = obj.iter().next().ok_or_else(|| {
        ExtractorError::malformed("Sentiment object is empty", raw)
    })?;
    let labels = scalar_text(value).ok_or_else(|| {
        ExtractorError::malformed(format!("Sentiment value for '{}' is not a string", key), raw)
    })?;

    Ok(SentimentRecord::new(key.as_str(), labels))
}

fn as_object<'v>(
    value: &'v Value,
    name: &str,
    raw: &str,
) -> Result<&'v Map<String, Value>, ExtractorError> {
    value
        .as_object()
        .ok_or_else(|| ExtractorError::malformed(format!("'{}' is not a JSON object", name), raw))
}

/// Render a JSON value as metadata text
///
/// Strings pass through; numbers and booleans are stringified (models like to
/// emit `"year": 1999`); arrays of those are joined with ", ".
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) => None,
                other => scalar_text(other),
            })
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(", ")),
        Value::Null | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_response() {
        let response = r#"{"metadata": {"genre": "horror, romantic"}, "sentiment": {"1_user_dialogue": "like, dislike"}}"#;

        let (metadata, sentiment) = parse_llm_response(response).unwrap();
        assert_eq!(metadata.get("genre"), Some("horror, romantic"));
        assert_eq!(sentiment.key, "1_user_dialogue");
        assert_eq!(sentiment.value, "like, dislike");
    }

    #[test]
    fn test_field_order_is_preserved() {
        let response = r#"{
            "metadata": {"review": "Films without cheesy dialogue", "genre": "superhero", "actor": "Tom Holland"},
            "sentiment": {"1_user_dialogue": "like, like, like"}
        }"#;

        let (metadata, _) = parse_llm_response(response).unwrap();
        let fields: Vec<_> = metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(fields, vec!["review", "genre", "actor"]);
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n{\"metadata\": {\"greet\": \"hi\"}, \"sentiment\": {\"1_user_dialogue\": \"neutral\"}}\n```";

        let (metadata, _) = parse_llm_response(response).unwrap();
        assert_eq!(metadata.get("greet"), Some("hi"));
    }

    #[test]
    fn test_parse_invalid_json_keeps_raw_text() {
        let response = "Sure! Here is the JSON you asked for";
        match parse_llm_response(response) {
            Err(ExtractorError::MalformedResponse { raw, .. }) => assert_eq!(raw, response),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_truncated_json() {
        let response = r#"{"metadata": {"genre": "action"}, "sentiment": {"1_user_dia"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ExtractorError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_parse_json_not_object() {
        let response = r#"["metadata", "sentiment"]"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ExtractorError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_missing_sentiment() {
        let response = r#"{"metadata": {"genre": "action"}}"#;
        match parse_llm_response(response) {
            Err(ExtractorError::IncompleteResponse { missing }) => {
                assert_eq!(missing, vec!["sentiment".to_string()]);
            }
            other => panic!("Expected IncompleteResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_both_keys() {
        let response = r#"{"genre": "action"}"#;
        match parse_llm_response(response) {
            Err(ExtractorError::IncompleteResponse { missing }) => {
                assert_eq!(missing, vec!["metadata".to_string(), "sentiment".to_string()]);
            }
            other => panic!("Expected IncompleteResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers_and_arrays_are_stringified() {
        let response = r#"{
            "metadata": {"year": 1999, "actor": ["Keanu Reeves", "Carrie-Anne Moss"]},
            "sentiment": {"1_user_dialogue": ["like", "like", "like"]}
        }"#;

        let (metadata, sentiment) = parse_llm_response(response).unwrap();
        assert_eq!(metadata.get("year"), Some("1999"));
        assert_eq!(metadata.get("actor"), Some("Keanu Reeves, Carrie-Anne Moss"));
        assert_eq!(sentiment.value, "like, like, like");
    }

    #[test]
    fn test_nested_metadata_is_malformed() {
        let response = r#"{"metadata": {"genre": {"name": "action"}}, "sentiment": {"1_user_dialogue": "like"}}"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ExtractorError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_sentiment_with_two_keys_is_malformed() {
        let response = r#"{"metadata": {"genre": "action"}, "sentiment": {"1_user_dialogue": "like", "2_user_dialogue": "like"}}"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ExtractorError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json), json);
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_from_single_line_fence() {
        assert_eq!(extract_json(r#"```{"key": "value"}```"#), r#"{"key": "value"}"#);
        assert_eq!(extract_json(r#"```json {"key": "value"} ```"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_parse_single_line_fenced_response() {
        let response = r#"```json{"metadata": {"genre": "war"}, "sentiment": {"1_user_dialogue": "like"}}```"#;

        let (metadata, sentiment) = parse_llm_response(response).unwrap();
        assert_eq!(metadata.get("genre"), Some("war"));
        assert_eq!(sentiment.value, "like");
    }
}
