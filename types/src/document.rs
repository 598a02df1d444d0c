use std::sync::Arc;

use crate::LineNumber;

/// Immutable snapshot of the query text.
///
/// A new snapshot is created on every edit; cloning is cheap (shared buffer).
/// Lines are split on `'\n'` only, so a trailing `'\r'` stays part of the line
/// content. This matches how the validator numbers lines.
///
/// All offsets exposed by this crate are character offsets (Unicode scalar
/// values from the start of the text), not byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    text: Arc<str>,
}

impl Document {
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines in order, without their line breaks.
    ///
    /// Always yields at least one (possibly empty) line; text ending in `'\n'`
    /// yields an empty trailing line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'\n').count() + 1
    }

    #[must_use]
    pub fn line(&self, line: LineNumber) -> Option<&str> {
        self.lines().nth(line.index())
    }

    /// Length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text between two character offsets (`from..to`).
    ///
    /// Returns `None` if the range is inverted or extends past the end.
    #[must_use]
    pub fn slice(&self, from: usize, to: usize) -> Option<&str> {
        if from > to {
            return None;
        }
        let start = byte_index(&self.text, from)?;
        let tail = &self.text[start..];
        let len = byte_index(tail, to - from)?;
        Some(&tail[..len])
    }
}

fn byte_index(text: &str, char_offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain([text.len()])
        .nth(char_offset)
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        self.text()
    }
}
