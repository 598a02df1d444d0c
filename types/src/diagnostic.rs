//! Renderable diagnostics and gutter marks.

use std::ops::Range;

use serde::Serialize;
use thiserror::Error;

use crate::LineNumber;

/// Severity level for a diagnostic.
///
/// Closed set. The validator does not grade its findings, so every
/// diagnostic is a warning today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

impl Severity {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
        }
    }
}

/// Visual variant of a gutter marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Warning,
}

impl MarkerKind {
    #[must_use]
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Self::Warning,
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Warning => "\u{26a0}",
        }
    }

    #[must_use]
    pub fn ascii_glyph(self) -> &'static str {
        match self {
            Self::Warning => "!",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("diagnostic range is inverted: from {from} > to {to}")]
pub struct InvertedRangeError {
    pub from: usize,
    pub to: usize,
}

/// A single character-range diagnostic anchored to a document.
///
/// Fields are private so the `from <= to` invariant holds after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    from: usize,
    to: usize,
    severity: Severity,
    message: String,
}

impl Diagnostic {
    pub fn new(
        from: usize,
        to: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Result<Self, InvertedRangeError> {
        if from > to {
            return Err(InvertedRangeError { from, to });
        }
        Ok(Self {
            from,
            to,
            severity,
            message: message.into(),
        })
    }

    /// Start offset (inclusive), in characters.
    #[must_use]
    pub fn from(&self) -> usize {
        self.from
    }

    /// End offset (exclusive), in characters.
    #[must_use]
    pub fn to(&self) -> usize {
        self.to
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a cursor at `offset` sits on this diagnostic.
    ///
    /// Both ends count, so a cursor parked at the end of the highlighted
    /// line still shows the hover message.
    #[must_use]
    pub fn touches(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }
}

/// One gutter marker per line carrying at least one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GutterMark {
    line: LineNumber,
    kind: MarkerKind,
}

impl GutterMark {
    #[must_use]
    pub fn new(line: LineNumber, kind: MarkerKind) -> Self {
        Self { line, kind }
    }

    #[must_use]
    pub fn line(&self) -> LineNumber {
        self.line
    }

    #[must_use]
    pub fn kind(&self) -> MarkerKind {
        self.kind
    }
}
