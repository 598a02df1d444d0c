//! Issue parser for the validator's `"Line <N>: <message>"` strings.
//!
//! Tolerant by construction: anything that does not match is simply not a
//! line finding. It still appears in the plain issue list, it just never
//! becomes a diagnostic.

use std::sync::LazyLock;

use querylens_types::{LineNumber, ParsedIssue, RawIssue};
use regex::Regex;

/// `Line`, a space, ASCII digits, a colon, then at most one whitespace
/// character before the message. `(?s)` keeps multi-line messages intact.
static LINE_ISSUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^Line ([0-9]+):\s?(.*)$").expect("valid line issue regex")
});

/// Parse one raw issue string.
///
/// Returns `None` when the prefix does not match, when the line number is
/// zero, or when it does not fit in a `u32`.
#[must_use]
pub fn parse_issue(raw: &str) -> Option<ParsedIssue> {
    let Some(caps) = LINE_ISSUE.captures(raw) else {
        tracing::debug!(issue = raw, "Issue has no line reference");
        return None;
    };
    let Ok(number) = caps[1].parse::<u32>() else {
        tracing::debug!(issue = raw, "Dropping issue with unrepresentable line number");
        return None;
    };
    let Some(line) = LineNumber::new(number) else {
        tracing::debug!(issue = raw, "Dropping issue referencing line 0");
        return None;
    };
    Some(ParsedIssue::new(line, &caps[2]))
}

/// Parse a batch, keeping every raw issue paired with its parse result.
#[must_use]
pub fn parse_issues(raw: &[RawIssue]) -> Vec<(&RawIssue, Option<ParsedIssue>)> {
    raw.iter()
        .map(|issue| (issue, parse_issue(issue.as_str())))
        .collect()
}
