//! Expression-level divisions and operator ordering.
//!
//! All binary operators share one precedence level and associate strictly
//! left to right; only parentheses group. A unary operator binds to the term
//! immediately after it.

use jack_ir::grammar::{is_binary_operator, is_operator, is_unary_operator};
use jack_ir::Token;
use tracing::debug;

use crate::scan::{closing_or_end, find_closing, inside, split_top_level};
use crate::TokenRange;

/// One step of an expression in evaluation order.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PostfixItem<'a> {
    Operand(TokenRange<'a>),
    Binary(char),
    Unary(char),
}

/// `name(args)` or `qualifier.name(args)`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CallParts<'a> {
    pub qualifier: Option<&'a str>,
    pub name: &'a str,
    /// Tokens inside the argument parentheses.
    pub args: TokenRange<'a>,
}

/// `name[index]`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ArrayAccess<'a> {
    pub name: &'a str,
    pub index: TokenRange<'a>,
}

/// Split an argument list on top-level commas.
///
/// Empty input (and empty pieces such as a trailing comma) yield no entries.
pub fn expression_list(tokens: &[Token]) -> Vec<TokenRange<'_>> {
    split_top_level(tokens, ',')
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Divide an expression into terms and single-token operators.
///
/// `name[...]`, `name(...)`, `q.name(...)` and a parenthesized group each stay
/// one term.
pub fn terms(expr: &[Token]) -> Vec<TokenRange<'_>> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < expr.len() {
        let end = term_end(expr, i);
        out.push(&expr[i..end]);
        i = end;
    }
    out
}

/// Term division for the expressions of a `let` statement.
///
/// An expression with no top-level operator is kept whole as a single term,
/// so a call result or element read on the right of `=` is never split.
pub fn assignment_terms(expr: &[Token]) -> Vec<TokenRange<'_>> {
    if expr.is_empty() {
        return Vec::new();
    }
    if has_top_level_operator(expr) {
        terms(expr)
    } else {
        vec![expr]
    }
}

/// Order a term sequence for emission.
///
/// A binary operator is emitted after its right operand, a unary operator
/// after the term it prefixes. A unary position is the start of the
/// expression or right after another operator.
pub fn postfix<'a>(terms: &[TokenRange<'a>]) -> Vec<PostfixItem<'a>> {
    let mut out = Vec::with_capacity(terms.len());
    let mut pending_binary: Option<char> = None;
    let mut pending_unary: Vec<char> = Vec::new();
    let mut expect_operand = true;

    for &term in terms {
        if let Some(op) = single_operator(term) {
            if expect_operand && is_unary_operator(op) {
                pending_unary.push(op);
            } else if is_binary_operator(op) {
                if let Some(dangling) = pending_binary.replace(op) {
                    debug!(op = %dangling, "operator without right operand");
                }
                expect_operand = true;
            }
            continue;
        }

        out.push(PostfixItem::Operand(term));
        while let Some(op) = pending_unary.pop() {
            out.push(PostfixItem::Unary(op));
        }
        if let Some(op) = pending_binary.take() {
            out.push(PostfixItem::Binary(op));
        }
        expect_operand = false;
    }

    if let Some(op) = pending_binary {
        debug!(op = %op, "trailing operator dropped");
    }
    out
}

/// Recognize a call term.
pub fn call_parts(term: &[Token]) -> Option<CallParts<'_>> {
    let first = term.first()?.identifier()?;

    let (qualifier, name, open) = match term.get(1)?.symbol()? {
        '(' => (None, first, 1),
        '.' => {
            let name = term.get(2)?.identifier()?;
            if !term.get(3)?.is_symbol('(') {
                return None;
            }
            (Some(first), name, 3)
        }
        _ => return None,
    };

    Some(CallParts {
        qualifier,
        name,
        args: inside(term, open),
    })
}

/// Recognize an array element term.
pub fn array_access(term: &[Token]) -> Option<ArrayAccess<'_>> {
    let name = term.first()?.identifier()?;
    if !term.get(1)?.is_symbol('[') {
        return None;
    }
    Some(ArrayAccess {
        name,
        index: inside(term, 1),
    })
}

/// Exclusive end of the term starting at `start`.
fn term_end(expr: &[Token], start: usize) -> usize {
    let token = &expr[start];

    if token.symbol().is_some_and(|c| c == '(' || c == '[') {
        return group_end(expr, start);
    }

    if token.identifier().is_some() {
        let mut j = start + 1;
        if expr.get(j).is_some_and(|t| t.is_symbol('.'))
            && expr.get(j + 1).is_some_and(|t| t.identifier().is_some())
        {
            j += 2;
        }
        if expr
            .get(j)
            .is_some_and(|t| t.is_symbol('(') || t.is_symbol('['))
        {
            return group_end(expr, j);
        }
        return j;
    }

    start + 1
}

fn group_end(expr: &[Token], open: usize) -> usize {
    (closing_or_end(expr, open) + 1).min(expr.len())
}

fn single_operator(term: &[Token]) -> Option<char> {
    match term {
        [token] => token.symbol().filter(|&c| is_operator(c)),
        _ => None,
    }
}

fn has_top_level_operator(expr: &[Token]) -> bool {
    let mut i = 0;
    while i < expr.len() {
        if expr[i].symbol().is_some_and(|c| c == '(' || c == '[') {
            i = find_closing(expr, i).map_or(expr.len(), |close| close + 1);
            continue;
        }
        if expr[i].symbol().is_some_and(is_operator) {
            return true;
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests;
