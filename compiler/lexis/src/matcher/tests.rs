use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::*;
use crate::pattern::{one_of, optional, sequence};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Space,
    Comma,
    Null,
    Number,
    Ident,
}

impl TokenKind for Kind {
    const WHITESPACE: Self = Kind::Space;
}

fn run(matcher: &Matcher<Kind>, text: &str) -> Option<(Kind, String)> {
    let mut s = Stream::from_text(text);
    matcher(&mut s).map(|t| (t.kind(), t.value_as_string()))
}

// === char_matcher / string_matcher ===

#[test]
fn char_matcher_recognizes_one_char() {
    let m = char_matcher(Kind::Comma, ',');
    assert_eq!(run(&m, ",x"), Some((Kind::Comma, ",".to_string())));
    assert_eq!(run(&m, "x,"), None);
    assert_eq!(run(&m, ""), None);
}

#[test]
fn string_matcher_requires_full_literal() {
    let m = string_matcher(Kind::Null, "null");
    assert_eq!(run(&m, "null]"), Some((Kind::Null, "null".to_string())));
    assert_eq!(run(&m, "nul"), None);
    assert_eq!(run(&m, "nil"), None);
}

#[test]
fn empty_string_matcher_never_matches() {
    let m = string_matcher(Kind::Null, "");
    assert_eq!(run(&m, "anything"), None);
}

// === class_matcher ===

#[test]
fn class_matcher_is_greedy() {
    let m = class_matcher(Kind::Ident, |c| c.is_alphanumeric() || c == '_');
    assert_eq!(run(&m, "foo_1 bar"), Some((Kind::Ident, "foo_1".to_string())));
    assert_eq!(run(&m, " foo"), None);
}

#[test]
fn class_matcher_handles_multibyte() {
    let m = class_matcher(Kind::Ident, char::is_alphabetic);
    assert_eq!(run(&m, "\u{3b1}\u{3b2}!"), Some((Kind::Ident, "\u{3b1}\u{3b2}".to_string())));
}

// === pattern_matcher ===

#[test]
fn pattern_matcher_wraps_combinators() {
    let digits = Pattern::satisfy(|c| c.is_ascii_digit());
    let number = sequence([optional(Pattern::char('-')), digits.clone(), optional(digits)]);
    let m = pattern_matcher(Kind::Number, number);
    assert_eq!(run(&m, "-42,"), Some((Kind::Number, "-42".to_string())));
    assert_eq!(run(&m, "x"), None);
}

#[test]
fn pattern_matcher_rejects_empty_match() {
    let m = pattern_matcher(Kind::Number, optional(Pattern::char('+')));
    assert_eq!(run(&m, "5"), None);
}

#[test]
fn pattern_matcher_with_alternatives() {
    let m = pattern_matcher(
        Kind::Null,
        one_of([Pattern::literal("null"), Pattern::literal("nil")]),
    );
    assert_eq!(run(&m, "nil"), Some((Kind::Null, "nil".to_string())));
}

// === whitespace_matcher ===

#[test]
fn whitespace_matcher_takes_ascii_run() {
    let m = whitespace_matcher::<Kind>();
    assert_eq!(
        run(&m, " \t\r\n  x"),
        Some((Kind::Space, " \t\r\n  ".to_string()))
    );
    assert_eq!(run(&m, "x "), None);
    assert_eq!(run(&m, ""), None);
}

#[test]
fn whitespace_matcher_includes_unicode_whitespace() {
    let m = whitespace_matcher::<Kind>();
    let text = " \u{a0}\u{2003}\t\u{0c}x";
    assert_eq!(
        run(&m, text),
        Some((Kind::Space, " \u{a0}\u{2003}\t\u{0c}".to_string()))
    );
}

#[test]
fn whitespace_matcher_advances_position() {
    let m = whitespace_matcher::<Kind>();
    let mut s = Stream::from_text("  \n \u{2003}y");
    assert!(m(&mut s).is_some());
    assert_eq!((s.row(), s.column(), s.offset()), (2, 3, 5));
    assert_eq!(s.peek_char(), Some('y'));
}

#[test]
fn whitespace_matcher_on_window_stream() {
    let m = whitespace_matcher::<Kind>();
    let mut s = Stream::from_reader(Cursor::new(" \n\u{a0}z".as_bytes().to_vec()));
    let token = m(&mut s).map(|t| t.value_as_string());
    assert_eq!(token, Some(" \n\u{a0}".to_string()));
    assert_eq!(s.peek_char(), Some('z'));
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_whitespace {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn byte_path_matches_char_path(text in "[ \\t\\n\\r\u{a0}\u{2003}ab]{0,40}") {
            let m = whitespace_matcher::<Kind>();
            let mut buffered = Stream::from_text(&text);
            let mut window = Stream::from_reader(Cursor::new(text.as_bytes().to_vec()));
            let a = m(&mut buffered).map(|t| t.value_as_string());
            let b = m(&mut window).map(|t| t.value_as_string());
            prop_assert_eq!(a, b);
            prop_assert_eq!(buffered.position(), window.position());
        }
    }
}
