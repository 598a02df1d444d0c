//! Annotation pipeline: turns validator issue strings into diagnostics.
//!
//! ```text
//! RawIssue[] --parse--> ParsedIssue[] --map(LineOffsetTable)--> Diagnostic[] --> Overlay
//!                                                                               ├─ inline()
//!                                                                               └─ gutter()
//! ```
//!
//! Everything here is a pure function of its inputs. The session controller
//! owns the state and calls in whenever a validate response is applied.

pub mod line_index;
pub mod mapper;
pub mod overlay;
pub mod parse;

pub use line_index::LineOffsetTable;
pub use mapper::{annotate, annotate_with_table, map_diagnostics};
pub use overlay::Overlay;
pub use parse::{parse_issue, parse_issues};
