//! Reserved keyword resolution.
//!
//! The lookup uses the text length as a first-pass filter (keywords range
//! from 2 to 11 characters), then matches against the keywords of that
//! length.

use jack_ir::Keyword;

/// Look up a reserved keyword by text.
///
/// Returns `None` for anything that is not exactly a keyword, including
/// differently-cased spellings.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<Keyword> {
    let len = text.len();

    // Guard: all keywords are 2-11 chars and start with a lowercase letter
    if !(2..=11).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "do" => Some(Keyword::Do),
            "if" => Some(Keyword::If),
            _ => None,
        },
        3 => match text {
            "int" => Some(Keyword::Int),
            "let" => Some(Keyword::Let),
            "var" => Some(Keyword::Var),
            _ => None,
        },
        4 => match text {
            "char" => Some(Keyword::Char),
            "else" => Some(Keyword::Else),
            "null" => Some(Keyword::Null),
            "this" => Some(Keyword::This),
            "true" => Some(Keyword::True),
            "void" => Some(Keyword::Void),
            _ => None,
        },
        5 => match text {
            "class" => Some(Keyword::Class),
            "false" => Some(Keyword::False),
            "field" => Some(Keyword::Field),
            "while" => Some(Keyword::While),
            _ => None,
        },
        6 => match text {
            "method" => Some(Keyword::Method),
            "return" => Some(Keyword::Return),
            "static" => Some(Keyword::Static),
            _ => None,
        },
        7 => match text {
            "boolean" => Some(Keyword::Boolean),
            _ => None,
        },
        8 => match text {
            "function" => Some(Keyword::Function),
            _ => None,
        },
        11 => match text {
            "constructor" => Some(Keyword::Constructor),
            _ => None,
        },
        _ => None,
    }
}
