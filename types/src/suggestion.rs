use crate::{NO_SUGGESTION_MESSAGE, RawIssue, SUGGESTION_FAILED_MESSAGE};

/// Where a stored suggestion's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOrigin {
    /// Replacement text produced by the suggest-fix service.
    Service,
    /// One of the fixed fallback messages.
    Fallback,
}

/// Read-only replacement text proposed for the document.
///
/// Not re-validated; it has no link to the diagnostics it was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    text: String,
    origin: SuggestionOrigin,
}

impl Suggestion {
    #[must_use]
    pub fn from_service(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: SuggestionOrigin::Service,
        }
    }

    #[must_use]
    pub fn fallback(message: &'static str) -> Self {
        Self {
            text: message.to_owned(),
            origin: SuggestionOrigin::Fallback,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn origin(&self) -> SuggestionOrigin {
        self.origin
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == SuggestionOrigin::Fallback
    }
}

/// What the validate boundary hands back. Transport errors never escape as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Completed(Vec<RawIssue>),
    Failed,
}

/// What the suggest-fix boundary hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Suggested(String),
    /// The service answered, but without a usable string.
    Empty,
    Failed,
}

impl SuggestionOutcome {
    /// Resolve to the suggestion the session stores.
    #[must_use]
    pub fn into_suggestion(self) -> Suggestion {
        match self {
            Self::Suggested(text) => Suggestion::from_service(text),
            Self::Empty => Suggestion::fallback(NO_SUGGESTION_MESSAGE),
            Self::Failed => Suggestion::fallback(SUGGESTION_FAILED_MESSAGE),
        }
    }
}
