//! Core domain types for querylens.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the annotation
//! pipeline consumes and produces these values, the service boundaries hand them
//! back as outcomes, and the session controller stores them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod diagnostic;
mod document;
mod ids;
mod issue;
mod suggestion;

pub use diagnostic::{Diagnostic, GutterMark, InvertedRangeError, MarkerKind, Severity};
pub use document::Document;
pub use ids::{DocumentRevision, LineNumber, RequestSeq};
pub use issue::{ParsedIssue, RawIssue};
pub use suggestion::{Suggestion, SuggestionOrigin, SuggestionOutcome, ValidationOutcome};

// ============================================================================
// Fallback messages
// ============================================================================

/// Synthetic issue shown in place of the validator's findings when the
/// validate request could not be completed.
pub const VALIDATION_FAILED_MESSAGE: &str = "Error validating query.";

/// Suggestion text stored when the suggest-fix request could not be completed.
pub const SUGGESTION_FAILED_MESSAGE: &str = "Error fetching suggestion.";

/// Suggestion text stored when the service answered without a usable string.
pub const NO_SUGGESTION_MESSAGE: &str = "No suggestion returned.";
