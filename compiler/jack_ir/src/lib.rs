//! Jack IR - core data types shared by every compiler stage.
//!
//! - Spans for source locations
//! - Tokens produced by the lexical classifier
//! - Grammar tables (reserved words, operators, built-in library classes)
//! - The stack-machine instruction model emitted by code generation
//!
//! The compiler never builds a syntax tree. Later stages work on contiguous
//! token slices ("token ranges"), so `Token` is the central type here.

pub mod grammar;
mod span;
mod token;
pub mod vm;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
