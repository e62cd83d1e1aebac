use super::*;
use crate::range_text;
use crate::test_helpers::toks;
use pretty_assertions::assert_eq;

fn kinds(stmts: &[Statement<'_>]) -> Vec<StatementKind> {
    stmts.iter().map(|s| s.kind).collect()
}

fn stmt_texts(stmts: &[Statement<'_>]) -> Vec<String> {
    stmts.iter().map(|s| range_text(s.tokens)).collect()
}

#[test]
fn sequence_of_all_kinds() {
    let t = toks(
        "let x = 1; do Output.printInt(x); while (x < 3) { let x = x + 1; } \
         if (x) { return 1; } return x;",
    );
    let stmts = statements(&t);
    assert_eq!(
        kinds(&stmts),
        vec![
            StatementKind::Let,
            StatementKind::Do,
            StatementKind::While,
            StatementKind::If,
            StatementKind::Return,
        ]
    );
    assert_eq!(
        stmt_texts(&stmts),
        vec![
            "let x = 1 ;",
            "do Output . printInt ( x ) ;",
            "while ( x < 3 ) { let x = x + 1 ; }",
            "if ( x ) { return 1 ; }",
            "return x ;",
        ]
    );
}

#[test]
fn if_absorbs_else() {
    let t = toks("if (a) { let b = 1; } else { let b = 2; } let c = 3;");
    let stmts = statements(&t);
    assert_eq!(
        stmt_texts(&stmts),
        vec![
            "if ( a ) { let b = 1 ; } else { let b = 2 ; }",
            "let c = 3 ;"
        ]
    );
}

#[test]
fn nested_blocks_stay_inside() {
    let t = toks("while (a) { if (b) { while (c) { do f(); } } } return;");
    let stmts = statements(&t);
    assert_eq!(kinds(&stmts), vec![StatementKind::While, StatementKind::Return]);

    let inner = while_body(stmts[0].tokens);
    assert_eq!(kinds(&inner), vec![StatementKind::If]);
}

#[test]
fn unterminated_statement_is_partial() {
    let t = toks("let a = 1; while (a) { let a = 0;");
    let stmts = statements(&t);
    assert_eq!(stmts.len(), 2);
    assert_eq!(range_text(stmts[1].tokens), "while ( a ) { let a = 0 ;");
}

#[test]
fn condition_contents() {
    let t = toks("while ((a + b) < c) { }");
    assert_eq!(range_text(condition(&t)), "( a + b ) < c");
}

#[test]
fn if_without_else() {
    let t = toks("if (a) { let b = 1; let c = 2; }");
    let blocks = if_blocks(&t);
    assert!(!blocks.has_else);
    assert_eq!(blocks.then_branch.len(), 2);
    assert!(blocks.else_branch.is_empty());
}

#[test]
fn if_with_else() {
    let t = toks("if (a) { let b = 1; } else { do f(); return; }");
    let blocks = if_blocks(&t);
    assert!(blocks.has_else);
    assert_eq!(kinds(&blocks.then_branch), vec![StatementKind::Let]);
    assert_eq!(
        kinds(&blocks.else_branch),
        vec![StatementKind::Do, StatementKind::Return]
    );
}

#[test]
fn nested_else_does_not_leak_outward() {
    let t = toks("if (a) { if (b) { let c = 1; } else { let c = 2; } }");
    let blocks = if_blocks(&t);
    assert!(!blocks.has_else);
    assert_eq!(blocks.then_branch.len(), 1);
}

#[test]
fn empty_else_is_still_an_else() {
    let t = toks("if (a) { } else { }");
    let blocks = if_blocks(&t);
    assert!(blocks.has_else);
    assert!(blocks.then_branch.is_empty());
    assert!(blocks.else_branch.is_empty());
}

#[test]
fn let_plain() {
    let t = toks("let sum = sum + 1;");
    let parts = let_parts(&t);
    assert_eq!(parts.map(|p| p.target), Some("sum"));
    assert_eq!(parts.map(|p| p.index.is_none()), Some(true));
    assert_eq!(parts.map(|p| range_text(p.value)), Some("sum + 1".to_string()));
}

#[test]
fn let_indexed() {
    let t = toks("let a[i + 1] = b[j];");
    let Some(parts) = let_parts(&t) else {
        panic!("expected let parts");
    };
    assert_eq!(parts.target, "a");
    assert_eq!(parts.index.map(range_text), Some("i + 1".to_string()));
    assert_eq!(range_text(parts.value), "b [ j ]");
}

#[test]
fn let_malformed() {
    assert_eq!(let_parts(&toks("let 3 = 4;")), None);
    assert_eq!(let_parts(&toks("let x 4;")), None);
    assert_eq!(let_parts(&toks("let a[1 = 2;")), None);
}

#[test]
fn return_and_do_payloads() {
    assert!(return_value(&toks("return;")).is_empty());
    assert_eq!(range_text(return_value(&toks("return x + 1;"))), "x + 1");
    assert_eq!(range_text(do_call(&toks("do g.f(1);"))), "g . f ( 1 )");
}
