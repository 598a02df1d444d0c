use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LineNumber;

/// An issue string exactly as the validator returned it.
///
/// Expected shape is `"Line <N>: <message>"`, but nothing guarantees it.
/// Raw issues are what the user sees in the plain issue list and what is sent
/// back to the suggest-fix service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawIssue(String);

impl RawIssue {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for RawIssue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RawIssue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for RawIssue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw issue that matched the `"Line <N>: <message>"` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIssue {
    line: LineNumber,
    message: String,
}

impl ParsedIssue {
    #[must_use]
    pub fn new(line: LineNumber, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn line(&self) -> LineNumber {
        self.line
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}
