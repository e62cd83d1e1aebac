use super::*;
use crate::test_helpers::{texts, toks};
use crate::range_text;
use pretty_assertions::assert_eq;

const POINT: &str = "
class Point {
    field int x, y;
    static int count;

    constructor Point new(int ax, int ay) {
        let x = ax;
        let y = ay;
        return this;
    }

    method int getX() { return x; }

    function void bump() {
        var int a;
        var Point p, q;
        if (a) { let a = 1; } else { let a = 2; }
        return;
    }
}";

#[test]
fn class_body_excludes_outer_braces() {
    let t = toks("class Main { field int a; }");
    assert_eq!(range_text(class_body(&t)), "field int a ;");
}

#[test]
fn class_body_without_brace_is_empty() {
    let t = toks("class Main field int a ;");
    assert!(class_body(&t).is_empty());
}

#[test]
fn class_var_decs_in_source_order() {
    let t = toks(POINT);
    let body = class_body(&t);
    assert_eq!(
        texts(&class_var_decs(body)),
        vec!["field int x , y ;", "static int count ;"]
    );
}

#[test]
fn unterminated_class_var_dec_is_partial() {
    let t = toks("field int x; static int y");
    assert_eq!(
        texts(&class_var_decs(&t)),
        vec!["field int x ;", "static int y"]
    );
}

#[test]
fn unterminated_dec_stops_before_next_block() {
    let t = toks("static int y function void f() { return; }");
    assert_eq!(texts(&class_var_decs(&t)), vec!["static int y"]);

    let t = toks("var Point p, q if (p) { }");
    assert_eq!(texts(&var_decs(&t)), vec!["var Point p , q"]);
}

#[test]
fn subroutines_cover_nested_blocks() {
    let t = toks(POINT);
    let subs = subroutine_decs(class_body(&t));
    assert_eq!(subs.len(), 3);
    assert_eq!(range_text(subs[1]), "method int getX ( ) { return x ; }");
    assert!(subs[2].last().is_some_and(|t| t.is_symbol('}')));
    assert!(range_text(subs[2]).ends_with("let a = 2 ; } return ; }"));
}

#[test]
fn unterminated_subroutine_is_partial() {
    let t = toks("function void f() { return; } method void g() { if (x) { return; }");
    let subs = subroutine_decs(&t);
    assert_eq!(subs.len(), 2);
    assert_eq!(range_text(subs[1]), "method void g ( ) { if ( x ) { return ; }");
}

#[test]
fn header_fields() {
    let t = toks(POINT);
    let subs = subroutine_decs(class_body(&t));

    let header = subroutine_header(subs[0]);
    assert_eq!(
        header,
        Some(SubroutineHeader {
            kind: SubroutineKind::Constructor,
            return_type: "Point",
            name: "new",
        })
    );
    assert_eq!(
        subroutine_header(subs[2]).map(|h| (h.kind, h.return_type)),
        Some((SubroutineKind::Function, "void"))
    );
}

#[test]
fn header_requires_identifier_name() {
    let t = toks("function void ( ) { }");
    assert_eq!(subroutine_header(&t), None);
}

#[test]
fn parameters_split_on_commas() {
    let t = toks(POINT);
    let subs = subroutine_decs(class_body(&t));
    assert_eq!(texts(&parameter_list(subs[0])), vec!["int ax", "int ay"]);
    assert!(parameter_list(subs[1]).is_empty());
}

#[test]
fn body_starts_after_parameters() {
    let t = toks(POINT);
    let subs = subroutine_decs(class_body(&t));
    assert_eq!(range_text(subroutine_body(subs[1])), "return x ;");
}

#[test]
fn var_decs_in_body() {
    let t = toks(POINT);
    let subs = subroutine_decs(class_body(&t));
    let body = subroutine_body(subs[2]);
    assert_eq!(
        texts(&var_decs(body)),
        vec!["var int a ;", "var Point p , q ;"]
    );
    assert!(var_decs(subroutine_body(subs[0])).is_empty());
}
