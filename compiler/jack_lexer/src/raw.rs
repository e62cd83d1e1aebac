//! Segmentation: raw source text to untyped pieces.

use jack_ir::Span;
use logos::Logos;

/// Raw piece shapes recognized by logos (before classification).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawPiece {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r#""[^"\n]*""#)]
    Quoted,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Digits,

    #[regex(r"[{}()\[\].,;+\-*/&|<>=~]")]
    Punct,
}

/// Consume a `/* ... */` or `/** ... */` body up to and including `*/`.
///
/// An unterminated comment swallows the rest of the source and fails, so it
/// surfaces as one invalid piece.
fn block_comment(lex: &mut logos::Lexer<'_, RawPiece>) -> bool {
    match lex.remainder().find("*/") {
        Some(pos) => {
            lex.bump(pos + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// One unclassified piece of source text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Split `source` into pieces.
///
/// Whitespace and comments are dropped. Text logos cannot match is still
/// returned as a piece so the classifier can reject it with its span.
pub fn segment(source: &str) -> Vec<Piece<'_>> {
    let mut lexer = RawPiece::lexer(source);
    let mut pieces = Vec::new();

    while let Some(raw) = lexer.next() {
        if matches!(raw, Ok(RawPiece::LineComment | RawPiece::BlockComment)) {
            continue;
        }
        pieces.push(Piece {
            text: lexer.slice(),
            span: Span::from_range(lexer.span()),
        });
    }

    pieces
}
