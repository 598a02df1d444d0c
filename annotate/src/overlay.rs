//! Annotation overlay: the two views an editor renders from a diagnostic set.

use std::collections::BTreeMap;

use querylens_types::{Diagnostic, Document, GutterMark, LineNumber, MarkerKind, Severity};

use crate::line_index::LineOffsetTable;

/// Inline diagnostics plus one gutter mark per affected line.
///
/// Immutable; recompute it whenever the diagnostic set or the document
/// changes. Editors pull from it on their own refresh schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    inline: Vec<Diagnostic>,
    /// Ascending by line, at most one per line.
    gutter: Vec<GutterMark>,
}

impl Overlay {
    pub const EMPTY: Self = Self {
        inline: Vec::new(),
        gutter: Vec::new(),
    };

    #[must_use]
    pub fn compute(document: &Document, diagnostics: Vec<Diagnostic>) -> Self {
        Self::with_table(&LineOffsetTable::for_document(document), diagnostics)
    }

    #[must_use]
    pub fn with_table(table: &LineOffsetTable, diagnostics: Vec<Diagnostic>) -> Self {
        let gutter = gutter_marks(table, &diagnostics);
        Self {
            inline: diagnostics,
            gutter,
        }
    }

    /// Diagnostics for the editor's lint layer, in mapper order.
    #[must_use]
    pub fn inline(&self) -> &[Diagnostic] {
        &self.inline
    }

    #[must_use]
    pub fn gutter(&self) -> &[GutterMark] {
        &self.gutter
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty()
    }

    #[must_use]
    pub fn mark_on(&self, line: LineNumber) -> Option<&GutterMark> {
        self.gutter
            .binary_search_by_key(&line, GutterMark::line)
            .ok()
            .map(|index| &self.gutter[index])
    }

    /// Diagnostics under a cursor at `offset`, for hover messages.
    pub fn hover(&self, offset: usize) -> impl Iterator<Item = &Diagnostic> {
        self.inline.iter().filter(move |d| d.touches(offset))
    }

    fn count_by_severity(&self, severity: Severity) -> usize {
        self.inline
            .iter()
            .filter(|d| d.severity() == severity)
            .count()
    }

    /// Compact status string like "W:3"; empty when there is nothing to show.
    #[must_use]
    pub fn status_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("W:{}", self.count_by_severity(Severity::Warning))
    }
}

/// Resolve each diagnostic's start back to its line; first one seen per line
/// decides the marker.
fn gutter_marks(table: &LineOffsetTable, diagnostics: &[Diagnostic]) -> Vec<GutterMark> {
    let mut seen: BTreeMap<LineNumber, MarkerKind> = BTreeMap::new();
    for diagnostic in diagnostics {
        let Some(line) = table.line_of_offset(diagnostic.from()) else {
            continue;
        };
        seen.entry(line)
            .or_insert_with(|| MarkerKind::for_severity(diagnostic.severity()));
    }
    seen.into_iter()
        .map(|(line, kind)| GutterMark::new(line, kind))
        .collect()
}
