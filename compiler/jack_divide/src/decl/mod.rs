//! Class- and subroutine-level divisions.

use jack_ir::grammar::{CLASS_VAR_KEYWORDS, SUBROUTINE_KEYWORDS};
use jack_ir::{Keyword, Token};
use tracing::debug;

use crate::scan::{find_closing, find_keyword, find_symbol, inside, split_top_level};
use crate::TokenRange;

/// The three subroutine flavours.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl SubroutineKind {
    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        match kw {
            Keyword::Constructor => Some(SubroutineKind::Constructor),
            Keyword::Function => Some(SubroutineKind::Function),
            Keyword::Method => Some(SubroutineKind::Method),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SubroutineKind::Constructor => "constructor",
            SubroutineKind::Function => "function",
            SubroutineKind::Method => "method",
        }
    }
}

/// `<kind> <returnType> <name>` at the head of a subroutine range.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SubroutineHeader<'a> {
    pub kind: SubroutineKind,
    pub return_type: &'a str,
    pub name: &'a str,
}

/// Tokens strictly between the class's outer braces.
///
/// Without a `{` the body is empty; without the matching `}` it runs to the
/// end of the unit.
pub fn class_body(tokens: &[Token]) -> TokenRange<'_> {
    match find_symbol(tokens, 0, '{') {
        Some(open) => inside(tokens, open),
        None => {
            debug!("class has no opening brace");
            &[]
        }
    }
}

/// Each `static`/`field` declaration, keyword through `;` inclusive.
pub fn class_var_decs(body: &[Token]) -> Vec<TokenRange<'_>> {
    anchored_to_semicolon(body, &CLASS_VAR_KEYWORDS)
}

/// Each subroutine declaration, keyword through the body's matching `}`.
///
/// An unterminated subroutine is returned as a partial range running to the
/// end of `body`, and scanning stops there.
pub fn subroutine_decs(body: &[Token]) -> Vec<TokenRange<'_>> {
    let mut decs = Vec::new();
    let mut cursor = 0;

    while let Some(start) = find_keyword(body, cursor, &SUBROUTINE_KEYWORDS) {
        let end = find_symbol(body, start, '{').and_then(|open| find_closing(body, open));
        match end {
            Some(end) => {
                decs.push(&body[start..=end]);
                cursor = end + 1;
            }
            None => {
                debug!(start, "unterminated subroutine declaration");
                decs.push(&body[start..]);
                break;
            }
        }
    }
    decs
}

/// Read the kind, return type and name from a subroutine range.
pub fn subroutine_header(sub: &[Token]) -> Option<SubroutineHeader<'_>> {
    let kind = SubroutineKind::from_keyword(sub.first()?.keyword()?)?;
    let return_type = sub.get(1)?.word()?;
    let name = sub.get(2)?.identifier()?;
    Some(SubroutineHeader {
        kind,
        return_type,
        name,
    })
}

/// Each `<type> <name>` parameter, split on commas inside the first `(...)`.
pub fn parameter_list(sub: &[Token]) -> Vec<TokenRange<'_>> {
    match find_symbol(sub, 0, '(') {
        Some(open) => split_top_level(inside(sub, open), ',')
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Tokens strictly inside the subroutine's `{ ... }` body.
pub fn subroutine_body(sub: &[Token]) -> TokenRange<'_> {
    let after_params = find_symbol(sub, 0, '(')
        .and_then(|open| find_closing(sub, open))
        .map_or(0, |close| close + 1);

    match find_symbol(sub, after_params, '{') {
        Some(open) => inside(sub, open),
        None => &[],
    }
}

/// Each `var` declaration, keyword through `;` inclusive.
pub fn var_decs(body: &[Token]) -> Vec<TokenRange<'_>> {
    anchored_to_semicolon(body, &[Keyword::Var])
}

fn anchored_to_semicolon<'a>(tokens: &'a [Token], anchors: &[Keyword]) -> Vec<TokenRange<'a>> {
    let mut decs = Vec::new();
    let mut cursor = 0;

    while let Some(start) = find_keyword(tokens, cursor, anchors) {
        let Some(end) = find_symbol(tokens, start + 1, ';') else {
            let stop = tokens[start + 1..]
                .iter()
                .position(ends_partial_declaration)
                .map_or(tokens.len(), |offset| start + 1 + offset);
            debug!(start, stop, "declaration without terminating semicolon");
            decs.push(&tokens[start..stop]);
            break;
        };
        decs.push(&tokens[start..=end]);
        cursor = end + 1;
    }
    decs
}

/// An unterminated declaration runs up to the next block or non-type keyword.
fn ends_partial_declaration(token: &Token) -> bool {
    token.is_symbol('{')
        || token.is_symbol('(')
        || token
            .keyword()
            .is_some_and(|kw| !matches!(kw, Keyword::Int | Keyword::Char | Keyword::Boolean))
}

#[cfg(test)]
mod tests;
