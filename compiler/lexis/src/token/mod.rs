//! Tokens produced by matchers and stamped by the tokenizer.

use std::fmt;

use lexis_core::Position;

/// Tag type for token kinds.
///
/// Parsers define their own kind enum and name the variant the implicit
/// whitespace matcher should emit.
pub trait TokenKind: Copy + Eq + fmt::Debug {
    /// Kind given to runs of whitespace.
    const WHITESPACE: Self;
}

/// A recognized unit of source text.
///
/// Matchers build tokens with [`Token::new`]; the [`Tokenizer`] then stamps
/// the position at which matching began. Tokens are immutable.
///
/// [`Tokenizer`]: crate::Tokenizer
#[derive(Clone, PartialEq, Eq)]
pub struct Token<K> {
    kind: K,
    value: String,
    position: Position,
}

impl<K: TokenKind> Token<K> {
    /// An unstamped token (positioned at [`Position::START`]).
    pub fn new(kind: K, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            position: Position::START,
        }
    }

    pub(crate) fn stamped(self, position: Position) -> Self {
        Self { position, ..self }
    }

    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// The matched text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The matched text as an owned string.
    pub fn value_as_string(&self) -> String {
        self.value.clone()
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Rune offset where the token starts.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// `true` for tokens of kind [`TokenKind::WHITESPACE`].
    pub fn is_whitespace(&self) -> bool {
        self.kind == K::WHITESPACE
    }
}

impl<K: fmt::Debug> fmt::Debug for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.value, self.position)
    }
}

#[cfg(test)]
mod tests;
