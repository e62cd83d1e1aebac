//! Token types produced by the lexical classifier.
//!
//! A compiled unit is an ordered `Vec<Token>` with no whitespace or comment
//! tokens. Tokens are immutable once produced.

use super::Span;
use std::fmt;

/// A classified token with its span in the unit source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a token without a source location (tests, synthesized code).
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }

    /// The reserved word this token holds, if it is a keyword.
    #[inline]
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// The symbol character this token holds, if it is a symbol.
    #[inline]
    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            TokenKind::Symbol(c) => Some(c),
            _ => None,
        }
    }

    /// The identifier text, if this token is an identifier.
    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_symbol(&self, c: char) -> bool {
        self.symbol() == Some(c)
    }

    #[inline]
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.keyword() == Some(kw)
    }

    /// Check membership of this token's keyword in a keyword set.
    #[inline]
    pub fn is_any_keyword(&self, set: &[Keyword]) -> bool {
        self.keyword().is_some_and(|kw| set.contains(&kw))
    }

    /// Name-like text of the token: identifier text or keyword spelling.
    ///
    /// Declarations use this to read type names, which may be either a
    /// primitive keyword (`int`) or a class identifier (`Point`).
    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            TokenKind::Keyword(kw) => Some(kw.as_str()),
            _ => None,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// Token category plus value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Keyword(Keyword),
    Symbol(char),
    Identifier(String),
    /// Decimal integer constant in `0..=32767`.
    IntConst(u16),
    /// String constant body, quotes stripped, not unescaped.
    StringConst(String),
}

impl TokenKind {
    /// Human-readable category name, used in diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::IntConst(_) => "integerConstant",
            TokenKind::StringConst(_) => "stringConstant",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => f.write_str(kw.as_str()),
            TokenKind::Symbol(c) => write!(f, "{c}"),
            TokenKind::Identifier(name) => f.write_str(name),
            TokenKind::IntConst(value) => write!(f, "{value}"),
            TokenKind::StringConst(body) => write!(f, "\"{body}\""),
        }
    }
}

/// The reserved words of the language.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
