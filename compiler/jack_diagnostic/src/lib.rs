//! Diagnostic system for compiler error reporting.
//!
//! Every diagnostic carries:
//! - an error code for searchability
//! - a severity
//! - a message saying what went wrong
//! - notes giving context (which subroutine, which statement)
//!
//! There is no source-snippet rendering; diagnostics render to a
//! single header line plus `= note:` lines.

mod diagnostic;
mod error_code;

pub use diagnostic::{malformed_structure, unresolved_symbol, Diagnostic, Severity};
pub use error_code::ErrorCode;
