//! Lexer for Jack.
//!
//! Two passes:
//! 1. [`segment`] splits raw source into pieces with `logos`, dropping
//!    whitespace and comments and keeping quoted strings intact.
//! 2. [`classify`] assigns each piece a token category, checking the reserved
//!    keyword and symbol tables before falling back to literal and identifier
//!    patterns.
//!
//! Classification failures are hard errors: [`lex`] stops at the first one.

mod classify;
mod keywords;
mod raw;

use jack_diagnostic::{Diagnostic, ErrorCode};
use jack_ir::{Span, Token};

pub use classify::{classify, MAX_INT_CONST};
pub use raw::{segment, Piece};

/// Errors that abort lexing of a unit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("invalid token `{text}` at {span}")]
    InvalidToken { text: String, span: Span },
    #[error("integer constant {text} at {span} exceeds {max}", max = MAX_INT_CONST)]
    IntegerOutOfRange { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidToken { span, .. } | LexError::IntegerOutOfRange { span, .. } => {
                *span
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::InvalidToken { .. } => ErrorCode::E0001,
            LexError::IntegerOutOfRange { .. } => ErrorCode::E0002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}

/// Segment and classify a whole unit.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    segment(source)
        .into_iter()
        .map(|piece| classify(piece.text, piece.span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_ir::{Keyword, TokenKind};
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        match lex(source) {
            Ok(tokens) => tokens.into_iter().map(|t| t.kind).collect(),
            Err(e) => panic!("lex failed: {e}"),
        }
    }

    #[test]
    fn lexes_a_let_statement() {
        assert_eq!(
            kinds("let x = y[2] + 1;"),
            vec![
                TokenKind::Keyword(Keyword::Let),
                TokenKind::Identifier("x".into()),
                TokenKind::Symbol('='),
                TokenKind::Identifier("y".into()),
                TokenKind::Symbol('['),
                TokenKind::IntConst(2),
                TokenKind::Symbol(']'),
                TokenKind::Symbol('+'),
                TokenKind::IntConst(1),
                TokenKind::Symbol(';'),
            ]
        );
    }

    #[test]
    fn comments_are_stripped() {
        let source = "/** doc */ class // trailing\n Main /* inline */ { }";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Identifier("Main".into()),
                TokenKind::Symbol('{'),
                TokenKind::Symbol('}'),
            ]
        );
    }

    #[test]
    fn strings_keep_inner_whitespace_and_symbols() {
        assert_eq!(
            kinds(r#"do Output.printString("a; b (c)");"#)[5],
            TokenKind::StringConst("a; b (c)".into())
        );
    }

    #[test]
    fn first_invalid_token_aborts() {
        let err = lex("let x = 1 # 2;").err();
        assert_eq!(
            err,
            Some(LexError::InvalidToken {
                text: "#".into(),
                span: Span::new(10, 11),
            })
        );
    }

    #[test]
    fn out_of_range_integer_aborts() {
        let err = lex("return 40000;").err();
        assert!(matches!(err, Some(LexError::IntegerOutOfRange { .. })));
        assert_eq!(err.map(|e| e.code()), Some(ErrorCode::E0002));
    }

    #[test]
    fn doc_commented_class_lexes() {
        let source = "/** A counter. */\nclass Counter {\n    /* fields */\n    field int count;\n}\n";
        assert_eq!(kinds(source).len(), 7);
    }

    #[test]
    fn unterminated_comment_aborts() {
        let err = lex("class Main { /* oops").err();
        assert_eq!(err.map(|e| e.code()), Some(ErrorCode::E0001));
    }
}
