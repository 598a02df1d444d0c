//! Line-offset index: where each line of a document begins.

use std::ops::Range;

use querylens_types::{Document, LineNumber};

/// Prefix-sum table from 1-based line number to the character offset at which
/// that line begins.
///
/// Built in one forward scan. Build it once per document and share it across
/// every diagnostic in a batch; per-issue "sum the lengths of all earlier
/// lines" lookups are quadratic on long documents.
///
/// Invariants: `line_start(1) == 0`, `line_start(n + 1) == line_start(n) +
/// line_len(n) + 1`, and the terminal offset equals the text length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOffsetTable {
    /// `starts[i]` is the offset of line `i + 1`. Never empty.
    starts: Vec<usize>,
    text_len: usize,
}

impl LineOffsetTable {
    #[must_use]
    pub fn build(text: &str) -> Self {
        let mut starts = vec![0];
        let mut offset = 0usize;
        for ch in text.chars() {
            offset += 1;
            if ch == '\n' {
                starts.push(offset);
            }
        }
        Self {
            starts,
            text_len: offset,
        }
    }

    #[must_use]
    pub fn for_document(document: &Document) -> Self {
        Self::build(document.text())
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Terminal offset: the length of the text in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    #[must_use]
    pub fn contains_line(&self, line: LineNumber) -> bool {
        line.index() < self.starts.len()
    }

    #[must_use]
    pub fn line_start(&self, line: LineNumber) -> Option<usize> {
        self.starts.get(line.index()).copied()
    }

    /// Offset just past the line's content, before its line break.
    #[must_use]
    pub fn line_end(&self, line: LineNumber) -> Option<usize> {
        let index = line.index();
        self.starts.get(index)?;
        Some(match self.starts.get(index + 1) {
            Some(next) => next - 1,
            None => self.text_len,
        })
    }

    #[must_use]
    pub fn line_len(&self, line: LineNumber) -> Option<usize> {
        self.line_range(line).map(|range| range.len())
    }

    #[must_use]
    pub fn line_range(&self, line: LineNumber) -> Option<Range<usize>> {
        Some(self.line_start(line)?..self.line_end(line)?)
    }

    /// Line containing `offset`. An offset sitting on a line break belongs to
    /// the line that break terminates.
    #[must_use]
    pub fn line_of_offset(&self, offset: usize) -> Option<LineNumber> {
        if offset > self.text_len {
            return None;
        }
        let index = self.starts.partition_point(|&start| start <= offset) - 1;
        LineNumber::from_index(index)
    }
}
