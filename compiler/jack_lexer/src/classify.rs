//! Lexical classification of a single piece.
//!
//! Order matters: keyword and symbol membership are checked before the
//! pattern fallbacks, so a reserved word is never an identifier.

use jack_ir::{grammar, Span, Token, TokenKind};

use crate::{keywords, LexError};

/// Largest integer constant the language accepts.
pub const MAX_INT_CONST: u16 = 32767;

/// Classify one segmented piece of text.
pub fn classify(text: &str, span: Span) -> Result<Token, LexError> {
    if let Some(kw) = keywords::lookup(text) {
        return Ok(Token::new(TokenKind::Keyword(kw), span));
    }

    if let Some(c) = single_symbol(text) {
        return Ok(Token::new(TokenKind::Symbol(c), span));
    }

    if is_int_literal(text) {
        return int_constant(text, span);
    }

    if let Some(body) = quoted_body(text) {
        return Ok(Token::new(TokenKind::StringConst(body.to_owned()), span));
    }

    if is_identifier(text) {
        return Ok(Token::new(TokenKind::Identifier(text.to_owned()), span));
    }

    Err(LexError::InvalidToken {
        text: text.to_owned(),
        span,
    })
}

fn single_symbol(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if grammar::is_symbol(c) => Some(c),
        _ => None,
    }
}

fn is_int_literal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn int_constant(text: &str, span: Span) -> Result<Token, LexError> {
    // Digit runs too long for u32 are out of range as well.
    match text.parse::<u32>() {
        Ok(value) if value <= u32::from(MAX_INT_CONST) => {
            let value = u16::try_from(value).unwrap_or(MAX_INT_CONST);
            Ok(Token::new(TokenKind::IntConst(value), span))
        }
        _ => Err(LexError::IntegerOutOfRange {
            text: text.to_owned(),
            span,
        }),
    }
}

/// Body of a `"..."` piece: no inner quote, no newline.
fn quoted_body(text: &str) -> Option<&str> {
    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    if body.contains(|c| c == '"' || c == '\n') {
        return None;
    }
    Some(body)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(text: &str) -> bool {
    let mut bytes = text.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests;
