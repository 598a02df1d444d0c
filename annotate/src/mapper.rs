//! Diagnostic mapper: parsed issues to whole-line character ranges.

use querylens_types::{Diagnostic, Document, ParsedIssue, RawIssue, Severity};

use crate::line_index::LineOffsetTable;
use crate::parse::parse_issues;

/// Map parsed issues to diagnostics covering the referenced line's content.
///
/// Output order follows input order; several issues on one line stay separate
/// inline diagnostics. Issues pointing past the last line (the document may
/// have changed since the validator saw it) are dropped.
pub fn map_diagnostics<'a, I>(table: &LineOffsetTable, issues: I) -> Vec<Diagnostic>
where
    I: IntoIterator<Item = &'a ParsedIssue>,
{
    issues
        .into_iter()
        .filter_map(|issue| map_issue(table, issue))
        .collect()
}

fn map_issue(table: &LineOffsetTable, issue: &ParsedIssue) -> Option<Diagnostic> {
    let Some(range) = table.line_range(issue.line()) else {
        tracing::debug!(
            line = issue.line().get(),
            line_count = table.line_count(),
            "Dropping issue beyond end of document"
        );
        return None;
    };
    Diagnostic::new(range.start, range.end, Severity::Warning, issue.message()).ok()
}

/// Run the whole pipeline for one batch of validator output against `table`.
#[must_use]
pub fn annotate_with_table(table: &LineOffsetTable, raw: &[RawIssue]) -> Vec<Diagnostic> {
    let parsed: Vec<ParsedIssue> = parse_issues(raw)
        .into_iter()
        .filter_map(|(_, parsed)| parsed)
        .collect();
    map_diagnostics(table, &parsed)
}

/// Run the whole pipeline for one batch of validator output.
#[must_use]
pub fn annotate(document: &Document, raw: &[RawIssue]) -> Vec<Diagnostic> {
    annotate_with_table(&LineOffsetTable::for_document(document), raw)
}
