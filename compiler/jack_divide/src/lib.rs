//! Structural divider for Jack token streams.
//!
//! No syntax tree is built. A declaration, statement, expression or term is
//! always a contiguous token slice ([`TokenRange`]); nesting is discovered by
//! re-scanning a range, never stored.
//!
//! Two primitive scans do all the work (see [`scan`]):
//! - **bracket-depth**: from an opening delimiter, walk forward counting
//!   matching open/close tokens until the depth returns to zero
//! - **keyword-anchored**: walk forward to the next token from a keyword set,
//!   then to the terminating `;` or matching `}`
//!
//! # Partial results
//!
//! When an expected delimiter is never found, every division returns what it
//! scanned so far instead of failing. Callers must tolerate empty or partial
//! ranges; the code generator turns the ones it cannot use into diagnostics.

mod decl;
mod expr;
pub mod scan;
mod stmt;

use jack_ir::Token;

pub use decl::{
    class_body, class_var_decs, parameter_list, subroutine_body, subroutine_decs,
    subroutine_header, var_decs, SubroutineHeader, SubroutineKind,
};
pub use expr::{
    array_access, assignment_terms, call_parts, expression_list, postfix, terms, ArrayAccess,
    CallParts, PostfixItem,
};
pub use stmt::{
    condition, do_call, if_blocks, let_parts, return_value, statements, while_body, IfBlocks,
    LetParts, Statement, StatementKind,
};

/// A contiguous sub-sequence of a unit's tokens, standing in for a tree node.
pub type TokenRange<'a> = &'a [Token];

/// Render a range back to space-separated source text (diagnostics, logs).
pub fn range_text(range: TokenRange<'_>) -> String {
    let mut out = String::new();
    for (i, token) in range.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&token.to_string());
    }
    out
}
