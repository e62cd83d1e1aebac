//! Static grammar tables.
//!
//! Pure data consumed by the divider (anchor keyword sets, operator sets)
//! and the code generator (built-in library classes).

use crate::Keyword;

/// Every reserved symbol character.
pub const SYMBOLS: [char; 19] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

/// Keywords that open a class-variable declaration.
pub const CLASS_VAR_KEYWORDS: [Keyword; 2] = [Keyword::Static, Keyword::Field];

/// Keywords that open a subroutine declaration.
pub const SUBROUTINE_KEYWORDS: [Keyword; 3] =
    [Keyword::Constructor, Keyword::Function, Keyword::Method];

/// Keywords that open a statement.
pub const STATEMENT_KEYWORDS: [Keyword; 5] = [
    Keyword::Let,
    Keyword::If,
    Keyword::While,
    Keyword::Do,
    Keyword::Return,
];

/// Binary operators. All share one precedence level.
pub const BINARY_OPERATORS: [char; 9] = ['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Prefix operators.
pub const UNARY_OPERATORS: [char; 2] = ['-', '~'];

/// Library classes that are called directly, never through a receiver.
pub const BUILTIN_CLASSES: [&str; 8] = [
    "Array", "Keyboard", "Math", "Memory", "Output", "Screen", "String", "Sys",
];

#[inline]
pub fn is_symbol(c: char) -> bool {
    SYMBOLS.contains(&c)
}

#[inline]
pub fn is_binary_operator(c: char) -> bool {
    BINARY_OPERATORS.contains(&c)
}

#[inline]
pub fn is_unary_operator(c: char) -> bool {
    UNARY_OPERATORS.contains(&c)
}

/// Either kind of operator. `-` is both.
#[inline]
pub fn is_operator(c: char) -> bool {
    is_binary_operator(c) || is_unary_operator(c)
}

#[inline]
pub fn is_builtin_class(name: &str) -> bool {
    BUILTIN_CLASSES.contains(&name)
}
