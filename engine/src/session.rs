//! Session controller: the one mutable owner of document and results.
//!
//! State is derived from what the session holds rather than stored next to
//! it, so there is no flag to keep in sync with the data:
//!
//! ```text
//!            edit (from anywhere) ──────────────────────────────┐
//!                                                               v
//!   Idle ──start_validate──> Validating ──finish──> Validated ──start_suggest_fix──> SuggestingFix
//!                                ^                      │                                  │
//!                                └────start_validate────┘                               finish
//!                                                                                          v
//!                                                                                    FixSuggested
//! ```
//!
//! Every outbound request carries a [`RequestTicket`]. A completion is applied
//! only when its ticket is the one the session is waiting on for that kind of
//! request and its revision still matches the current document. Anything
//! else is stale and silently discarded.

use querylens_annotate::{LineOffsetTable, Overlay, annotate_with_table};
use querylens_types::{
    Diagnostic, Document, DocumentRevision, GutterMark, RawIssue, RequestSeq, Suggestion,
    SuggestionOutcome, VALIDATION_FAILED_MESSAGE, ValidationOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Validate,
    SuggestFix,
}

impl RequestKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::SuggestFix => "suggest-fix",
        }
    }
}

/// Identity captured by an outbound request at issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    kind: RequestKind,
    revision: DocumentRevision,
    seq: RequestSeq,
}

impl RequestTicket {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    #[must_use]
    pub fn revision(&self) -> DocumentRevision {
        self.revision
    }

    #[must_use]
    pub fn seq(&self) -> RequestSeq {
        self.seq
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Validating,
    Validated,
    SuggestingFix,
    FixSuggested,
}

impl SessionState {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Validated => "validated",
            Self::SuggestingFix => "suggesting fix",
            Self::FixSuggested => "fix suggested",
        }
    }
}

/// Payload for the validate boundary.
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub ticket: RequestTicket,
    pub document: Document,
}

/// Payload for the suggest-fix boundary.
#[derive(Debug, Clone)]
pub struct SuggestFixRequest {
    pub ticket: RequestTicket,
    pub document: Document,
    /// The plain issue strings the user sees, not the parsed forms.
    pub issues: Vec<RawIssue>,
}

/// Whether a completion changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

/// Result of the last applied validation.
#[derive(Debug, Clone, Default)]
struct Validation {
    issues: Vec<RawIssue>,
    overlay: Overlay,
}

#[derive(Debug, Default)]
pub struct Session {
    document: Document,
    revision: DocumentRevision,
    next_seq: RequestSeq,
    validation: Option<Validation>,
    suggestion: Option<Suggestion>,
    pending_validate: Option<RequestTicket>,
    pending_fix: Option<RequestTicket>,
}

impl Session {
    #[must_use]
    pub fn new(text: impl Into<Document>) -> Self {
        Self {
            document: text.into(),
            ..Self::default()
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn revision(&self) -> DocumentRevision {
        self.revision
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.pending_validate.is_some() {
            SessionState::Validating
        } else if self.pending_fix.is_some() {
            SessionState::SuggestingFix
        } else if self.suggestion.is_some() {
            SessionState::FixSuggested
        } else if self.validation.is_some() {
            SessionState::Validated
        } else {
            SessionState::Idle
        }
    }

    /// Raw validator output for the plain issue list, unparsed entries included.
    #[must_use]
    pub fn issues(&self) -> &[RawIssue] {
        self.validation.as_ref().map_or(&[][..], |v| v.issues.as_slice())
    }

    /// Current overlay; empty until a validation has been applied.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        static EMPTY: Overlay = Overlay::EMPTY;
        self.validation.as_ref().map_or(&EMPTY, |v| &v.overlay)
    }

    /// Inline diagnostics for the editor's lint layer, read on demand.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.overlay().inline()
    }

    #[must_use]
    pub fn gutter(&self) -> &[GutterMark] {
        self.overlay().gutter()
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_validate.is_some() || self.pending_fix.is_some()
    }

    #[must_use]
    pub fn can_validate(&self) -> bool {
        self.pending_validate.is_none()
    }

    /// Suggest-fix needs at least one diagnostic and no fix already in flight.
    #[must_use]
    pub fn can_suggest_fix(&self) -> bool {
        !self.diagnostics().is_empty() && self.pending_fix.is_none()
    }

    // ── Transitions ────────────────────────────────────────────────────

    /// Replace the document. Clears every result and forgets outstanding
    /// requests; their completions will be discarded.
    pub fn edit(&mut self, text: impl Into<Document>) {
        self.document = text.into();
        self.revision = self.revision.next();
        self.validation = None;
        self.suggestion = None;
        self.pending_validate = None;
        self.pending_fix = None;
    }

    /// Begin a validation. `None` while one is already in flight.
    pub fn start_validate(&mut self) -> Option<ValidateRequest> {
        if !self.can_validate() {
            tracing::debug!("Validate rejected: already validating");
            return None;
        }
        let ticket = self.issue_ticket(RequestKind::Validate);
        self.pending_validate = Some(ticket);
        Some(ValidateRequest {
            ticket,
            document: self.document.clone(),
        })
    }

    pub fn finish_validate(&mut self, ticket: RequestTicket, outcome: ValidationOutcome) -> Completion {
        if !self.accepts(self.pending_validate, ticket) {
            return Completion::Discarded;
        }
        self.pending_validate = None;

        let issues = match outcome {
            ValidationOutcome::Completed(issues) => issues,
            ValidationOutcome::Failed => vec![RawIssue::from(VALIDATION_FAILED_MESSAGE)],
        };
        let table = LineOffsetTable::for_document(&self.document);
        let diagnostics = annotate_with_table(&table, &issues);
        tracing::info!(
            revision = %self.revision,
            issues = issues.len(),
            diagnostics = diagnostics.len(),
            "Validation applied"
        );
        self.validation = Some(Validation {
            issues,
            overlay: Overlay::with_table(&table, diagnostics),
        });
        // A new diagnosis supersedes any suggestion made from the previous one.
        self.suggestion = None;
        Completion::Applied
    }

    /// Begin a fix suggestion. `None` when there are no diagnostics or a
    /// suggestion is already in flight.
    pub fn start_suggest_fix(&mut self) -> Option<SuggestFixRequest> {
        if !self.can_suggest_fix() {
            tracing::debug!(
                diagnostics = self.diagnostics().len(),
                in_flight = self.pending_fix.is_some(),
                "Suggest-fix rejected"
            );
            return None;
        }
        let ticket = self.issue_ticket(RequestKind::SuggestFix);
        self.pending_fix = Some(ticket);
        Some(SuggestFixRequest {
            ticket,
            document: self.document.clone(),
            issues: self.issues().to_vec(),
        })
    }

    pub fn finish_suggest_fix(
        &mut self,
        ticket: RequestTicket,
        outcome: SuggestionOutcome,
    ) -> Completion {
        if !self.accepts(self.pending_fix, ticket) {
            return Completion::Discarded;
        }
        self.pending_fix = None;

        let suggestion = outcome.into_suggestion();
        tracing::info!(
            revision = %self.revision,
            fallback = suggestion.is_fallback(),
            "Suggestion applied"
        );
        self.suggestion = Some(suggestion);
        Completion::Applied
    }

    fn issue_ticket(&mut self, kind: RequestKind) -> RequestTicket {
        self.next_seq = self.next_seq.next();
        RequestTicket {
            kind,
            revision: self.revision,
            seq: self.next_seq,
        }
    }

    fn accepts(&self, pending: Option<RequestTicket>, ticket: RequestTicket) -> bool {
        let fresh = pending == Some(ticket) && ticket.revision == self.revision;
        if !fresh {
            tracing::debug!(
                kind = ticket.kind.label(),
                seq = %ticket.seq,
                ticket_revision = %ticket.revision,
                current_revision = %self.revision,
                "Discarding stale result"
            );
        }
        fresh
    }
}
