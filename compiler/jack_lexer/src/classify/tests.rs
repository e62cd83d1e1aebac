use super::*;
use jack_ir::Keyword;
use pretty_assertions::assert_eq;

fn kind(text: &str) -> TokenKind {
    match classify(text, Span::DUMMY) {
        Ok(token) => token.kind,
        Err(e) => panic!("classify({text:?}) failed: {e}"),
    }
}

#[test]
fn reserved_words_win_over_identifier_pattern() {
    assert_eq!(kind("class"), TokenKind::Keyword(Keyword::Class));
    assert_eq!(kind("this"), TokenKind::Keyword(Keyword::This));
    assert_eq!(kind("classy"), TokenKind::Identifier("classy".into()));
}

#[test]
fn every_symbol_classifies() {
    for c in grammar::SYMBOLS {
        assert_eq!(kind(&c.to_string()), TokenKind::Symbol(c));
    }
}

#[test]
fn integer_constants_decode() {
    assert_eq!(kind("0"), TokenKind::IntConst(0));
    assert_eq!(kind("007"), TokenKind::IntConst(7));
    assert_eq!(kind("32767"), TokenKind::IntConst(32767));
}

#[test]
fn integer_constants_out_of_range() {
    assert!(matches!(
        classify("32768", Span::DUMMY),
        Err(LexError::IntegerOutOfRange { .. })
    ));
    assert!(matches!(
        classify("99999999999999999999", Span::DUMMY),
        Err(LexError::IntegerOutOfRange { .. })
    ));
}

#[test]
fn string_constants_strip_quotes_without_unescaping() {
    assert_eq!(kind("\"\""), TokenKind::StringConst(String::new()));
    assert_eq!(kind("\"a b\""), TokenKind::StringConst("a b".into()));
    assert_eq!(kind(r#""a\n""#), TokenKind::StringConst(r"a\n".into()));
}

#[test]
fn identifiers() {
    assert_eq!(kind("_tmp"), TokenKind::Identifier("_tmp".into()));
    assert_eq!(kind("x2"), TokenKind::Identifier("x2".into()));
}

#[test]
fn invalid_tokens_keep_text_and_span() {
    let span = Span::new(4, 5);
    assert_eq!(
        classify("@", span).err(),
        Some(LexError::InvalidToken {
            text: "@".into(),
            span,
        })
    );
    assert!(classify("2x", span).is_err());
    assert!(classify("\"open", span).is_err());
    assert!(classify("==", span).is_err());
}
