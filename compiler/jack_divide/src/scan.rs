//! Primitive scans over token ranges.

use jack_ir::{Keyword, Token};

/// The closing delimiter for an opening one.
pub fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

/// Bracket-depth scan.
///
/// `open_idx` must point at `(`, `[` or `{`. Returns the index where the
/// depth returns to zero, or `None` if the range ends first.
pub fn find_closing(tokens: &[Token], open_idx: usize) -> Option<usize> {
    let open = tokens.get(open_idx)?.symbol()?;
    let close = closing_delimiter(open)?;

    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open_idx) {
        if token.is_symbol(open) {
            depth += 1;
        } else if token.is_symbol(close) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Like [`find_closing`], but an unterminated group runs to the end of the range.
pub fn closing_or_end(tokens: &[Token], open_idx: usize) -> usize {
    find_closing(tokens, open_idx).unwrap_or(tokens.len())
}

/// Tokens strictly inside the group opened at `open_idx`.
///
/// Unterminated groups yield everything after the opener.
pub fn inside(tokens: &[Token], open_idx: usize) -> &[Token] {
    let start = (open_idx + 1).min(tokens.len());
    let end = closing_or_end(tokens, open_idx).max(start);
    &tokens[start..end]
}

/// First index at or after `from` holding symbol `c`.
pub fn find_symbol(tokens: &[Token], from: usize, c: char) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, t)| t.is_symbol(c))
        .map(|(i, _)| i)
}

/// Keyword-anchored scan: first index at or after `from` whose keyword is in `set`.
pub fn find_keyword(tokens: &[Token], from: usize, set: &[Keyword]) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, t)| t.is_any_keyword(set))
        .map(|(i, _)| i)
}

/// End index (inclusive) of the `{`-block starting at or after `from`.
pub fn block_end(tokens: &[Token], from: usize) -> Option<usize> {
    let open = find_symbol(tokens, from, '{')?;
    find_closing(tokens, open)
}

/// Split on `separator` symbols that sit at bracket depth zero.
///
/// An empty range yields no pieces; a trailing separator yields no empty
/// final piece.
pub fn split_top_level(tokens: &[Token], separator: char) -> Vec<&[Token]> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.symbol() {
            Some('(' | '[' | '{') => depth += 1,
            Some(')' | ']' | '}') => depth = depth.saturating_sub(1),
            Some(c) if c == separator && depth == 0 => {
                pieces.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < tokens.len() {
        pieces.push(&tokens[start..]);
    }
    pieces
}
