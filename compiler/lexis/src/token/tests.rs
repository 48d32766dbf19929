use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Space,
    Word,
}

impl TokenKind for Kind {
    const WHITESPACE: Self = Kind::Space;
}

#[test]
fn new_token_is_unstamped() {
    let token = Token::new(Kind::Word, "hello");
    assert_eq!(token.kind(), Kind::Word);
    assert_eq!(token.value(), "hello");
    assert_eq!(token.value_as_string(), "hello".to_string());
    assert_eq!(token.position(), Position::START);
}

#[test]
fn stamping_sets_position_only() {
    let at = Position {
        offset: 12,
        row: 2,
        column: 5,
    };
    let token = Token::new(Kind::Word, "id").stamped(at);
    assert_eq!((token.offset(), token.row(), token.column()), (12, 2, 5));
    assert_eq!(token.value(), "id");
}

#[test]
fn whitespace_kind_is_recognized() {
    assert!(Token::new(Kind::Space, " ").is_whitespace());
    assert!(!Token::new(Kind::Word, "w").is_whitespace());
}

#[test]
fn debug_shows_kind_value_and_position() {
    let token = Token::new(Kind::Word, "x");
    assert_eq!(format!("{token:?}"), "Word(\"x\") @ 1:1");
}
