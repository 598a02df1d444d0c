//! Plain-text rendering of a validated session for the terminal.
//!
//! ```text
//!   Issues (2):
//!     - Line 1: avoid SELECT *
//!     - Missing valid history comment.
//!
//!   ⚠ 1 │ SELECT *
//!       │ ^^^^^^^^ avoid SELECT *
//!     2 │ FROM t
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use querylens_annotate::{LineOffsetTable, Overlay};
use querylens_types::{Diagnostic, Document, LineNumber, RawIssue, Suggestion};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Glyphs {
    ascii: bool,
}

impl Glyphs {
    pub(crate) fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    fn rule(self) -> char {
        if self.ascii { '|' } else { '\u{2502}' }
    }

    fn marker(self, overlay: &Overlay, line: LineNumber) -> &'static str {
        match overlay.mark_on(line) {
            Some(mark) if self.ascii => mark.kind().ascii_glyph(),
            Some(mark) => mark.kind().glyph(),
            None => " ",
        }
    }
}

pub(crate) fn render_issues(issues: &[RawIssue]) -> String {
    if issues.is_empty() {
        return "No issues found.\n".to_string();
    }
    let mut out = format!("Issues ({}):\n", issues.len());
    for issue in issues {
        let _ = writeln!(out, "  - {issue}");
    }
    out
}

/// The document with gutter marks and a `^` underline per diagnostic.
pub(crate) fn render_listing(document: &Document, overlay: &Overlay, glyphs: Glyphs) -> String {
    let table = LineOffsetTable::for_document(document);
    let by_line = diagnostics_by_line(&table, overlay.inline());
    let number_width = table.line_count().to_string().len();
    let rule = glyphs.rule();

    let mut out = String::new();
    for (index, text) in document.lines().enumerate() {
        let Some(line) = LineNumber::from_index(index) else {
            break;
        };
        let diagnostics = by_line.get(&line).map_or(&[][..], Vec::as_slice);
        let is_last = index + 1 == table.line_count();
        if is_last && text.is_empty() && diagnostics.is_empty() {
            break;
        }

        let marker = glyphs.marker(overlay, line);
        let _ = writeln!(out, "{marker} {:>number_width$} {rule} {text}", line.get());

        let Some(start) = table.line_start(line) else {
            continue;
        };
        for diagnostic in diagnostics {
            let column = diagnostic.from().saturating_sub(start);
            let width = (diagnostic.to() - diagnostic.from()).max(1);
            let _ = writeln!(
                out,
                "  {:number_width$} {rule} {}{} {}",
                "",
                " ".repeat(column),
                "^".repeat(width),
                diagnostic.message()
            );
        }
    }
    out
}

pub(crate) fn render_suggestion(suggestion: &Suggestion) -> String {
    let mut out = String::from("Suggested fix:\n");
    for line in suggestion.text().lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

fn diagnostics_by_line<'a>(
    table: &LineOffsetTable,
    diagnostics: &'a [Diagnostic],
) -> BTreeMap<LineNumber, Vec<&'a Diagnostic>> {
    let mut grouped: BTreeMap<LineNumber, Vec<&Diagnostic>> = BTreeMap::new();
    for diagnostic in diagnostics {
        if let Some(line) = table.line_of_offset(diagnostic.from()) {
            grouped.entry(line).or_default().push(diagnostic);
        }
    }
    grouped
}
