//! JSON request and response shapes.
//!
//! Responses are decoded leniently into `serde_json::Value` first: the
//! validator's contract is "array of strings", but anything else is tolerated
//! as "no issues" rather than treated as a failure.

use querylens_types::RawIssue;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct ValidateRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuggestFixRequest<'a> {
    pub query: &'a str,
    pub issues: &'a [RawIssue],
}

/// Fields checked, in order, when the suggestion arrives as an object.
const SUGGESTION_FIELDS: [&str; 2] = ["answer", "message"];

pub(crate) fn issues_from_value(value: Value) -> Vec<RawIssue> {
    let Value::Array(items) = value else {
        tracing::warn!(
            kind = value_kind(&value),
            "Validate response is not an array; treating as no issues"
        );
        return Vec::new();
    };

    let total = items.len();
    let issues: Vec<RawIssue> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(RawIssue::from(s)),
            _ => None,
        })
        .collect();
    if issues.len() != total {
        tracing::warn!(
            dropped = total - issues.len(),
            "Validate response contained non-string entries"
        );
    }
    issues
}

/// Extract the suggestion text, if the response carries a usable one.
pub(crate) fn suggestion_from_value(value: Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        Value::Object(mut map) => SUGGESTION_FIELDS.iter().find_map(|field| {
            match map.remove(*field) {
                Some(Value::String(s)) => Some(s),
                _ => None,
            }
        })?,
        other => {
            tracing::warn!(
                kind = value_kind(&other),
                "Suggest-fix response has no usable text"
            );
            return None;
        }
    };
    if text.trim().is_empty() { None } else { Some(text) }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issues_from_string_array() {
        let issues = issues_from_value(json!(["Line 1: a", "Missing valid history comment."]));
        assert_eq!(
            issues,
            vec![
                RawIssue::from("Line 1: a"),
                RawIssue::from("Missing valid history comment.")
            ]
        );
    }

    #[test]
    fn non_array_means_no_issues() {
        assert!(issues_from_value(json!({"detail": "oops"})).is_empty());
        assert!(issues_from_value(json!("Line 1: a")).is_empty());
        assert!(issues_from_value(Value::Null).is_empty());
    }

    #[test]
    fn non_string_entries_are_dropped() {
        let issues = issues_from_value(json!(["Line 2: b", 3, null, {"x": 1}, "Line 4: d"]));
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].as_str(), "Line 4: d");
    }

    #[test]
    fn suggestion_from_plain_string() {
        assert_eq!(
            suggestion_from_value(json!("SELECT 1")),
            Some("SELECT 1".to_string())
        );
    }

    #[test]
    fn suggestion_from_primary_field() {
        assert_eq!(
            suggestion_from_value(json!({"answer": "SELECT 2", "message": "ignored"})),
            Some("SELECT 2".to_string())
        );
        assert_eq!(
            suggestion_from_value(json!({"message": "SELECT 3"})),
            Some("SELECT 3".to_string())
        );
    }

    #[test]
    fn unusable_suggestions() {
        assert_eq!(suggestion_from_value(json!({"answer": 42})), None);
        assert_eq!(suggestion_from_value(json!({"sources": []})), None);
        assert_eq!(suggestion_from_value(json!("   ")), None);
        assert_eq!(suggestion_from_value(json!(null)), None);
        assert_eq!(suggestion_from_value(json!(["SELECT 1"])), None);
    }

    #[test]
    fn suggest_request_serializes_issues_as_strings() {
        let issues = vec![RawIssue::from("Line 1: a")];
        let body = serde_json::to_value(SuggestFixRequest {
            query: "SELECT *",
            issues: &issues,
        })
        .unwrap();
        assert_eq!(body, json!({"query": "SELECT *", "issues": ["Line 1: a"]}));
    }
}
