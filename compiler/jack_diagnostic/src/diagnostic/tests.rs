use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("test error")
        .in_subroutine("Main.main")
        .with_note("some context");

    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "test error");
    assert!(diag.is_error());
    assert_eq!(diag.context.as_deref(), Some("Main.main"));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_diagnostic_display_format() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("malformed let statement")
        .in_subroutine("Main.run")
        .with_note("near `let x`");

    assert_eq!(
        diag.to_string(),
        "error [E1001]: malformed let statement\n  --> in Main.run\n  = note: near `let x`"
    );
}

#[test]
fn test_unresolved_symbol_is_warning() {
    let diag = unresolved_symbol("ghost");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert!(!diag.is_error());
    assert!(diag.message.contains("ghost"));
}

#[test]
fn test_malformed_structure() {
    let diag = malformed_structure("if statement", "if ( x");

    assert_eq!(diag.code, ErrorCode::E1001);
    assert!(diag.is_error());
    assert_eq!(diag.message, "malformed if statement");
    assert_eq!(diag.notes, vec!["near `if ( x`".to_string()]);
}
