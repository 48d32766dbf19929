//! Matchers: functions that recognize one token kind at the cursor.
//!
//! A matcher reads from the stream however it likes and returns the token
//! it recognized. The tokenizer rewinds the stream afterwards and replays
//! exactly `token.value()`, so lookahead past the token is harmless as long
//! as the reported value is what should be consumed.
//!
//! Matchers are tried in list order and the first success wins. Put
//! keyword and punctuation matchers before generic identifier matchers.

use lexis_core::{ByteStream, CharStream, Stream};

use crate::pattern::Pattern;
use crate::token::{Token, TokenKind};

/// Recognizer for one token kind.
pub type Matcher<K> = Box<dyn Fn(&mut Stream) -> Option<Token<K>>>;

/// A single character `expected`.
pub fn char_matcher<K: TokenKind + 'static>(kind: K, expected: char) -> Matcher<K> {
    Box::new(move |stream| {
        (stream.next_char() == Some(expected)).then(|| Token::new(kind, expected.to_string()))
    })
}

/// The exact text `literal`.
pub fn string_matcher<K: TokenKind + 'static>(kind: K, literal: impl Into<String>) -> Matcher<K> {
    let literal = literal.into();
    Box::new(move |stream| {
        let matched = !literal.is_empty() && stream.match_chars(&literal);
        matched.then(|| Token::new(kind, literal.as_str()))
    })
}

/// A maximal run of one or more characters accepted by `pred`.
pub fn class_matcher<K: TokenKind + 'static>(
    kind: K,
    pred: impl Fn(char) -> bool + 'static,
) -> Matcher<K> {
    Box::new(move |stream| {
        let mut value = String::new();
        while let Some(ch) = stream.peek_char() {
            if !pred(ch) {
                break;
            }
            value.push(ch);
            stream.next_char();
        }
        (!value.is_empty()).then(|| Token::new(kind, value))
    })
}

/// Whatever `pattern` matches. An empty match is no match.
pub fn pattern_matcher<K: TokenKind + 'static>(kind: K, pattern: Pattern) -> Matcher<K> {
    Box::new(move |stream| {
        pattern
            .apply(stream)
            .filter(|value| !value.is_empty())
            .map(|value| Token::new(kind, value))
    })
}

/// A maximal run of whitespace, emitted as [`TokenKind::WHITESPACE`].
///
/// ASCII space, tab, `\n` and `\r` are skipped with the SWAR scanner when
/// the stream is byte-addressable; other Unicode whitespace is checked one
/// character at a time.
pub fn whitespace_matcher<K: TokenKind + 'static>() -> Matcher<K> {
    Box::new(|stream| {
        let value = scan_whitespace(stream);
        (!value.is_empty()).then(|| Token::new(K::WHITESPACE, value))
    })
}

fn scan_whitespace(stream: &mut Stream) -> String {
    if let Some(bytes) = stream.bytes_mut() {
        let start = bytes.byte_position();
        loop {
            bytes.skip_whitespace();
            match bytes.peek_char() {
                Some(ch) if ch.is_whitespace() => {
                    bytes.next_char();
                }
                _ => break,
            }
        }
        return String::from_utf8_lossy(bytes.slice_from(start)).into_owned();
    }

    let mut value = String::new();
    while let Some(ch) = stream.peek_char() {
        if !ch.is_whitespace() {
            break;
        }
        value.push(ch);
        stream.next_char();
    }
    value
}

#[cfg(test)]
mod tests;
