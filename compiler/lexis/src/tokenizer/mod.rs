//! Matcher-driven tokenizer.
//!
//! For each token the tokenizer snapshots the stream, lets every matcher in
//! turn run directly on the live stream, and restores the snapshot after
//! each attempt. The first matcher to return a token wins; its value is then
//! replayed with [`CharStream::match_chars`] so the stream ends up exactly
//! past the token, however far the matcher looked ahead.
//!
//! # Marks
//!
//! [`Tokenizer::mark`] pushes a copy of the current cursor and
//! [`Tokenizer::rewind`] pops it back. Marks nest, which is enough for
//! backtracking parsers that speculatively consume tokens.

use lexis_core::{CharStream, Stream};
use tracing::{debug, trace, warn};

use crate::matcher::{whitespace_matcher, Matcher};
use crate::token::{Token, TokenKind};

/// Tokenizer knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Prepend [`whitespace_matcher`] to the matcher list.
    pub implicit_whitespace: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            implicit_whitespace: true,
        }
    }
}

/// Turns a [`Stream`] into [`Token`]s using an ordered matcher list.
///
/// # Long tokens over a window
///
/// Over a [`Stream::Window`] the snapshot taken before each token is an
/// ordinary clone, and the window only keeps
/// [`keep_behind`](lexis_core::WindowConfig::keep_behind) characters
/// behind the cursor that triggers a refill (8192 by default). A single
/// token longer than that evicts its own start: the replay fails, the
/// token is treated as no match and [`tokenize_all`](Self::tokenize_all)
/// stops with `false`. Size the window for the longest expected token, or
/// tokenize such input from a buffered stream.
pub struct Tokenizer<K: TokenKind> {
    stream: Stream,
    matchers: Vec<Matcher<K>>,
    marks: Vec<Stream>,
}

impl<K: TokenKind + 'static> Tokenizer<K> {
    /// A tokenizer with implicit whitespace handling over empty input.
    ///
    /// Call [`initialize`](Self::initialize) or
    /// [`initialize_from_stream`](Self::initialize_from_stream) to supply
    /// the source.
    pub fn new(matchers: Vec<Matcher<K>>) -> Self {
        Self::with_options(matchers, TokenizerOptions::default())
    }

    pub fn with_options(mut matchers: Vec<Matcher<K>>, options: TokenizerOptions) -> Self {
        if options.implicit_whitespace {
            matchers.insert(0, whitespace_matcher());
        }
        Self {
            stream: Stream::from_text(""),
            matchers,
            marks: Vec::new(),
        }
    }
}

impl<K: TokenKind> Tokenizer<K> {
    /// Tokenize `text` from the start. Existing marks are dropped.
    pub fn initialize(&mut self, text: &str) {
        self.initialize_from_stream(Stream::from_text(text));
    }

    /// Tokenize `stream` from its current position. Existing marks are dropped.
    pub fn initialize_from_stream(&mut self, stream: Stream) {
        self.stream = stream;
        self.marks.clear();
    }

    /// The underlying cursor.
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Consume and return the next token.
    ///
    /// Returns `None` at end of input, or when no matcher recognizes the
    /// text at the cursor; in the latter case the stream is left where it
    /// was and [`has_more_tokens`](Self::has_more_tokens) stays `true`.
    pub fn next_token(&mut self) -> Option<Token<K>> {
        if self.stream.is_at_end() {
            return None;
        }
        let snapshot = self.stream.clone();
        let start = snapshot.position();

        for (index, matcher) in self.matchers.iter().enumerate() {
            let candidate = matcher(&mut self.stream);
            self.stream.merge(&snapshot);
            let Some(token) = candidate else {
                continue;
            };
            if !self.stream.match_chars(token.value()) {
                warn!(
                    matcher = index,
                    kind = ?token.kind(),
                    value = token.value(),
                    at = %start,
                    "matcher returned text that does not match the input"
                );
                self.stream.merge(&snapshot);
                continue;
            }
            let token = token.stamped(start);
            trace!(kind = ?token.kind(), value = token.value(), at = %start, "token");
            return Some(token);
        }
        None
    }

    /// The token [`next_token`](Self::next_token) would return, without
    /// consuming it.
    pub fn peek_token(&mut self) -> Option<Token<K>> {
        let saved = self.stream.clone();
        let token = self.next_token();
        self.stream.merge(&saved);
        token
    }

    /// Tokenize everything that remains.
    ///
    /// The flag is `true` when the end of input was reached. It is `false`
    /// when no matcher recognized the text at the cursor, when a matcher
    /// produced an empty token (which would repeat forever), or when a
    /// window discarded the start of the current token; the tokens before
    /// that point are still returned.
    pub fn tokenize_all(&mut self) -> (Vec<Token<K>>, bool) {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            if token.value().is_empty() {
                warn!(kind = ?token.kind(), at = %token.position(), "empty token stops tokenizing");
                return (tokens, false);
            }
            tokens.push(token);
        }
        let complete = !self.stream.is_evicted() && self.stream.is_at_end();
        (tokens, complete)
    }

    /// Remember the current position for a later [`rewind`](Self::rewind).
    pub fn mark(&mut self) {
        debug!(depth = self.marks.len() + 1, at = %self.stream.position(), "mark");
        self.marks.push(self.stream.clone());
    }

    /// Return to the most recent mark, discarding it.
    ///
    /// Returns `false` (and does nothing) when there is no mark.
    pub fn rewind(&mut self) -> bool {
        let Some(mark) = self.marks.pop() else {
            return false;
        };
        self.stream.merge(&mark);
        debug!(depth = self.marks.len(), at = %mark.position(), "rewind");
        true
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.stream.row()
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.stream.column()
    }

    /// `false` once the stream is at its end.
    pub fn has_more_tokens(&mut self) -> bool {
        !self.stream.is_at_end()
    }
}

/// Yields tokens until [`Tokenizer::next_token`] returns `None`.
impl<K: TokenKind> Iterator for Tokenizer<K> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Token<K>> {
        self.next_token()
    }
}
