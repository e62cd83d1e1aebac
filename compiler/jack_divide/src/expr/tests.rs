use super::*;
use crate::range_text;
use crate::test_helpers::{texts, toks};
use pretty_assertions::assert_eq;

/// Render postfix order as a compact string: operands by text, operators bare,
/// unary operators prefixed with `u`.
fn order(expr: &str) -> Vec<String> {
    let t = toks(expr);
    postfix(&terms(&t))
        .into_iter()
        .map(|item| match item {
            PostfixItem::Operand(range) => range_text(range),
            PostfixItem::Binary(op) => op.to_string(),
            PostfixItem::Unary(op) => format!("u{op}"),
        })
        .collect()
}

#[test]
fn expression_list_top_level_only() {
    let t = toks("a, f(b, c), d[e]");
    assert_eq!(
        texts(&expression_list(&t)),
        vec!["a", "f ( b , c )", "d [ e ]"]
    );
    assert!(expression_list(&[]).is_empty());
}

#[test]
fn terms_keep_compound_terms_whole() {
    let t = toks("a[i + 1] * Math.max(x, y) - (b + c) + f()");
    assert_eq!(
        texts(&terms(&t)),
        vec![
            "a [ i + 1 ]",
            "*",
            "Math . max ( x , y )",
            "-",
            "( b + c )",
            "+",
            "f ( )",
        ]
    );
}

#[test]
fn terms_constants_and_unary() {
    let t = toks("-x + ~true & \"hi\"");
    assert_eq!(
        texts(&terms(&t)),
        vec!["-", "x", "+", "~", "true", "&", "\"hi\""]
    );
}

#[test]
fn unterminated_group_runs_to_end() {
    let t = toks("a + f(b, c");
    assert_eq!(texts(&terms(&t)), vec!["a", "+", "f ( b , c"]);
}

#[test]
fn assignment_terms_whole_without_operator() {
    let t = toks("game.score(1)");
    assert_eq!(texts(&assignment_terms(&t)), vec!["game . score ( 1 )"]);

    let t = toks("a[i - 1]");
    assert_eq!(texts(&assignment_terms(&t)), vec!["a [ i - 1 ]"]);
}

#[test]
fn assignment_terms_split_with_operator() {
    let t = toks("p.get(1) + q.get(2)");
    assert_eq!(
        texts(&assignment_terms(&t)),
        vec!["p . get ( 1 )", "+", "q . get ( 2 )"]
    );
    assert!(assignment_terms(&[]).is_empty());
}

#[test]
fn postfix_left_to_right() {
    assert_eq!(order("a - b * c"), vec!["a", "b", "-", "c", "*"]);
    assert_eq!(order("1 + 2 + 3"), vec!["1", "2", "+", "3", "+"]);
}

#[test]
fn postfix_parenthesized_group_is_operand() {
    assert_eq!(order("a * (b + c)"), vec!["a", "( b + c )", "*"]);
}

#[test]
fn postfix_unary() {
    assert_eq!(order("-x"), vec!["x", "u-"]);
    assert_eq!(order("a - -b"), vec!["a", "b", "u-", "-"]);
    assert_eq!(order("~~flag"), vec!["flag", "u~", "u~"]);
    assert_eq!(order("~a & b"), vec!["a", "u~", "b", "&"]);
}

#[test]
fn postfix_single_and_empty() {
    assert_eq!(order("x"), vec!["x"]);
    assert!(postfix(&[]).is_empty());
}

#[test]
fn postfix_trailing_operator_dropped() {
    assert_eq!(order("a +"), vec!["a"]);
}

#[test]
fn call_parts_qualified_and_bare() {
    let t = toks("Output.printInt(1 + 2)");
    let call = call_parts(&t);
    assert_eq!(call.and_then(|c| c.qualifier), Some("Output"));
    assert_eq!(call.map(|c| c.name), Some("printInt"));
    assert_eq!(call.map(|c| range_text(c.args)), Some("1 + 2".to_string()));

    let t = toks("draw()");
    let call = call_parts(&t);
    assert_eq!(call.map(|c| (c.qualifier, c.name)), Some((None, "draw")));
    assert_eq!(call.map(|c| c.args.is_empty()), Some(true));
}

#[test]
fn call_parts_rejects_non_calls() {
    assert_eq!(call_parts(&toks("x")), None);
    assert_eq!(call_parts(&toks("a[1]")), None);
    assert_eq!(call_parts(&toks("a.b")), None);
    assert_eq!(call_parts(&toks("(f)")), None);
}

#[test]
fn array_access_parts() {
    let t = toks("buf[i * 2]");
    let access = array_access(&t);
    assert_eq!(access.map(|a| a.name), Some("buf"));
    assert_eq!(access.map(|a| range_text(a.index)), Some("i * 2".to_string()));
    assert_eq!(array_access(&toks("f(1)")), None);
}
