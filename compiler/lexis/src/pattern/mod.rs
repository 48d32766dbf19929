//! Pattern combinators over a [`Stream`].
//!
//! A [`Pattern`] either matches, returning the characters it consumed, or
//! fails with `None`. Atomicity is explicit:
//!
//! | Combinator | On failure |
//! |------------|------------|
//! | [`Pattern::char`], [`Pattern::satisfy`] | the inspected character stays consumed |
//! | [`Pattern::literal`] | the matched prefix stays consumed |
//! | [`sequence`] | whatever earlier parts consumed stays consumed |
//! | [`one_of`] | the stream is untouched |
//! | [`optional`] | never fails; the stream is untouched on a miss |
//!
//! Wrap non-atomic patterns in [`one_of`] or [`optional`] (which run their
//! inner patterns on a clone) when a failed attempt must leave no trace.

use std::fmt;
use std::rc::Rc;

use lexis_core::{CharStream, Stream};
use smallvec::SmallVec;

type PatternFn = dyn Fn(&mut Stream) -> Option<String>;

/// Child list for `sequence` and `one_of`; most grammars use a handful.
type Patterns = SmallVec<[Pattern; 4]>;

/// A composable recognizer over a [`Stream`].
///
/// Cloning shares the underlying function.
#[derive(Clone)]
pub struct Pattern(Rc<PatternFn>);

impl Pattern {
    /// Wrap a hand-written recognizer.
    pub fn new(f: impl Fn(&mut Stream) -> Option<String> + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Run the pattern against `stream`.
    #[inline]
    pub fn apply(&self, stream: &mut Stream) -> Option<String> {
        (self.0)(stream)
    }

    /// Exactly the character `expected`.
    ///
    /// The next character is consumed whether or not it matches.
    pub fn char(expected: char) -> Self {
        Self::satisfy(move |ch| ch == expected)
    }

    /// One character accepted by `pred`.
    ///
    /// The next character is consumed whether or not it matches.
    pub fn satisfy(pred: impl Fn(char) -> bool + 'static) -> Self {
        Self::new(move |stream| match stream.next_char() {
            Some(ch) if pred(ch) => Some(ch.to_string()),
            _ => None,
        })
    }

    /// The exact text `literal`.
    ///
    /// Characters are consumed while they match; a mismatch stops before the
    /// offending character, leaving the matched prefix consumed.
    pub fn literal(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        Self::new(move |stream| {
            for expected in literal.chars() {
                if stream.peek_char() != Some(expected) {
                    return None;
                }
                stream.next_char();
            }
            Some(literal.clone())
        })
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pattern(..)")
    }
}

/// All of `patterns`, in order, on the same stream.
///
/// Stops at the first failure without rolling back.
pub fn sequence(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let patterns: Patterns = patterns.into_iter().collect();
    Pattern::new(move |stream| {
        let mut matched = String::new();
        for pattern in &patterns {
            matched.push_str(&pattern.apply(stream)?);
        }
        Some(matched)
    })
}

/// The first of `patterns` that matches.
///
/// Each alternative runs on a clone; the winner's position is merged back.
/// When every alternative fails the stream is unchanged.
pub fn one_of(patterns: impl IntoIterator<Item = Pattern>) -> Pattern {
    let patterns: Patterns = patterns.into_iter().collect();
    Pattern::new(move |stream| {
        patterns.iter().find_map(|pattern| {
            let mut attempt = stream.clone();
            let matched = pattern.apply(&mut attempt)?;
            stream.merge(&attempt);
            Some(matched)
        })
    })
}

/// `pattern`, or nothing.
///
/// Never fails: a miss leaves the stream untouched and yields `""`.
pub fn optional(pattern: Pattern) -> Pattern {
    Pattern::new(move |stream| {
        let mut attempt = stream.clone();
        match pattern.apply(&mut attempt) {
            Some(matched) => {
                stream.merge(&attempt);
                Some(matched)
            }
            None => Some(String::new()),
        }
    })
}
