//! Statement-level divisions.

use jack_ir::grammar::STATEMENT_KEYWORDS;
use jack_ir::{Keyword, Token};
use tracing::{debug, trace};

use crate::scan::{block_end, find_closing, find_keyword, find_symbol, inside};
use crate::TokenRange;

/// The five statement forms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StatementKind {
    Let,
    If,
    While,
    Do,
    Return,
}

impl StatementKind {
    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        match kw {
            Keyword::Let => Some(StatementKind::Let),
            Keyword::If => Some(StatementKind::If),
            Keyword::While => Some(StatementKind::While),
            Keyword::Do => Some(StatementKind::Do),
            Keyword::Return => Some(StatementKind::Return),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StatementKind::Let => "let",
            StatementKind::If => "if",
            StatementKind::While => "while",
            StatementKind::Do => "do",
            StatementKind::Return => "return",
        }
    }
}

/// One statement: its kind and full token range, keyword included.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Statement<'a> {
    pub kind: StatementKind,
    pub tokens: TokenRange<'a>,
}

/// The two branches of an `if`.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct IfBlocks<'a> {
    pub then_branch: Vec<Statement<'a>>,
    /// Empty when there is no `else`, and also for `else { }`.
    pub else_branch: Vec<Statement<'a>>,
    /// Whether an `else` clause follows the then-block.
    pub has_else: bool,
}

/// `let <target> [ '[' index ']' ] = <value> ;`
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LetParts<'a> {
    pub target: &'a str,
    pub index: Option<TokenRange<'a>>,
    pub value: TokenRange<'a>,
}

/// Divide a statement sequence.
///
/// `let`/`do`/`return` end at their `;`. `while` ends at its block's
/// matching `}`. `if` does too, extended through an immediately following
/// `else { ... }`. Tokens that open no statement are skipped.
pub fn statements(tokens: &[Token]) -> Vec<Statement<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    while let Some(start) = find_keyword(tokens, cursor, &STATEMENT_KEYWORDS) {
        let Some(kind) = tokens[start].keyword().and_then(StatementKind::from_keyword) else {
            break;
        };

        let end = match kind {
            StatementKind::Let | StatementKind::Do | StatementKind::Return => {
                find_symbol(tokens, start + 1, ';')
            }
            StatementKind::While => block_end(tokens, start + 1),
            StatementKind::If => block_end(tokens, start + 1).map(|then_end| {
                match tokens.get(then_end + 1) {
                    Some(t) if t.is_keyword(Keyword::Else) => {
                        block_end(tokens, then_end + 2).unwrap_or(tokens.len() - 1)
                    }
                    _ => then_end,
                }
            }),
        };

        let Some(end) = end else {
            debug!(kind = kind.as_str(), start, "unterminated statement");
            out.push(Statement {
                kind,
                tokens: &tokens[start..],
            });
            break;
        };

        trace!(kind = kind.as_str(), start, end, "statement");
        out.push(Statement {
            kind,
            tokens: &tokens[start..=end],
        });
        cursor = end + 1;
    }
    out
}

/// Tokens inside the first `( ... )` of an `if`/`while`.
pub fn condition(stmt: &[Token]) -> TokenRange<'_> {
    match find_symbol(stmt, 0, '(') {
        Some(open) => inside(stmt, open),
        None => &[],
    }
}

/// Divide an `if` statement into its then- and else-statement lists.
pub fn if_blocks(stmt: &[Token]) -> IfBlocks<'_> {
    let Some(then_open) = brace_after_condition(stmt) else {
        return IfBlocks::default();
    };

    let then_branch = statements(inside(stmt, then_open));

    let Some(then_close) = find_closing(stmt, then_open) else {
        return IfBlocks {
            then_branch,
            ..IfBlocks::default()
        };
    };

    let has_else = stmt
        .get(then_close + 1)
        .is_some_and(|t| t.is_keyword(Keyword::Else));

    let else_branch = if has_else {
        find_symbol(stmt, then_close + 2, '{')
            .map(|open| statements(inside(stmt, open)))
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    IfBlocks {
        then_branch,
        else_branch,
        has_else,
    }
}

/// The statements inside a `while` body.
pub fn while_body(stmt: &[Token]) -> Vec<Statement<'_>> {
    match brace_after_condition(stmt) {
        Some(open) => statements(inside(stmt, open)),
        None => Vec::new(),
    }
}

/// Split a `let` statement into target, optional index and value.
///
/// Returns `None` when the target is not an identifier or no `=` follows it.
pub fn let_parts(stmt: &[Token]) -> Option<LetParts<'_>> {
    let target = stmt.get(1)?.identifier()?;

    let (index, eq) = if stmt.get(2)?.is_symbol('[') {
        let close = find_closing(stmt, 2)?;
        (Some(&stmt[3..close]), close + 1)
    } else {
        (None, 2)
    };

    if !stmt.get(eq)?.is_symbol('=') {
        return None;
    }

    Some(LetParts {
        target,
        index,
        value: without_semicolon(&stmt[eq + 1..]),
    })
}

/// The expression after `return`, empty for a bare `return;`.
pub fn return_value(stmt: &[Token]) -> TokenRange<'_> {
    without_semicolon(stmt.get(1..).unwrap_or_default())
}

/// The call expression after `do`.
pub fn do_call(stmt: &[Token]) -> TokenRange<'_> {
    without_semicolon(stmt.get(1..).unwrap_or_default())
}

fn brace_after_condition(stmt: &[Token]) -> Option<usize> {
    let from = find_symbol(stmt, 0, '(')
        .and_then(|open| find_closing(stmt, open))
        .map_or(0, |close| close + 1);
    find_symbol(stmt, from, '{')
}

fn without_semicolon(tokens: &[Token]) -> TokenRange<'_> {
    match tokens.split_last() {
        Some((last, rest)) if last.is_symbol(';') => rest,
        _ => tokens,
    }
}

#[cfg(test)]
mod tests;
