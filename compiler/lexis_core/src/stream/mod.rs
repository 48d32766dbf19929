//! Character cursors over in-memory text or an incremental reader.
//!
//! Two implementations share one rune-level contract, [`CharStream`]:
//!
//! - [`BufferedStream`] owns the complete text behind an `Rc`. Clones share
//!   the text and copy only the cursor position. It also implements the
//!   byte-level fast path, [`ByteStream`], built on the [`swar`](crate::swar)
//!   scanners.
//! - [`WindowStream`] decodes a reader into a bounded window shared by every
//!   clone derived from one root.
//!
//! [`Stream`] wraps either one and is the type matchers operate on.
//!
//! # Backtracking
//!
//! Speculation is done by cloning a cursor, advancing the clone, and either
//! dropping it or copying its position back with [`CharStream::merge`].
//! Merging cursors that do not share a root is a programming error and
//! panics.

use std::io::{Read, Seek};

use crate::{Position, StreamError, WindowConfig};

mod buffered;
mod window;

pub use buffered::BufferedStream;
pub use window::WindowStream;

/// Rune-level cursor contract shared by every stream.
///
/// Reads take `&mut self` because a window may have to refill before it can
/// answer.
pub trait CharStream: Clone {
    /// The next character without consuming it.
    fn peek_char(&mut self) -> Option<char>;

    /// Consume and return the next character, applying the newline rule to
    /// the position.
    fn next_char(&mut self) -> Option<char>;

    /// `true` once no character remains.
    fn is_at_end(&mut self) -> bool {
        self.peek_char().is_none()
    }

    /// Current position.
    fn position(&self) -> Position;

    /// Copy `other`'s position into `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` was not derived from the same root as `self`.
    fn merge(&mut self, other: &Self);

    /// Rewind to the start of the source.
    fn reset(&mut self);

    fn row(&self) -> usize {
        self.position().row
    }

    fn column(&self) -> usize {
        self.position().column
    }

    fn offset(&self) -> usize {
        self.position().offset
    }

    /// Consume exactly `expected`, or nothing.
    ///
    /// On the first mismatch the cursor is restored to where it was before
    /// the call and `false` is returned.
    fn match_chars(&mut self, expected: &str) -> bool {
        let saved = self.clone();
        for ch in expected.chars() {
            if self.next_char() != Some(ch) {
                self.merge(&saved);
                return false;
            }
        }
        true
    }
}

/// Byte-level fast path for byte-addressable streams.
///
/// Offsets returned by the search methods are relative to the cursor.
/// Every method that advances keeps the rune-level [`Position`] in sync:
/// a step that would end inside a multi-byte character also consumes the
/// rest of it, and the counts returned include those bytes.
pub trait ByteStream: CharStream {
    fn peek_byte(&self) -> Option<u8>;

    /// The byte at the cursor. On a non-ASCII lead byte the whole character
    /// is consumed.
    fn next_byte(&mut self) -> Option<u8>;

    /// Up to `n` bytes starting at the cursor, without copying. Shorter than
    /// `n` near the end of the source.
    fn peek_bytes(&self, n: usize) -> &[u8];

    /// Advance by up to `n` bytes; returns how many were consumed.
    fn advance_bytes(&mut self, n: usize) -> usize;

    /// Advance past space, tab, `\n` and `\r`; returns the bytes skipped.
    fn skip_whitespace(&mut self) -> usize;

    /// Advance to the next `delim` (not consuming it) or to the end; returns
    /// the bytes skipped.
    fn skip_until(&mut self, delim: u8) -> usize;

    fn find_byte(&self, needle: u8) -> Option<usize>;

    fn find_any(&self, targets: &[u8]) -> Option<usize>;

    /// Bytes from the absolute byte offset `start` up to the cursor.
    fn slice_from(&self, start: usize) -> &[u8];

    /// Absolute byte offset of the cursor.
    fn byte_position(&self) -> usize;

    fn remaining_bytes(&self) -> usize;
}

/// A cursor over either kind of source.
#[derive(Clone, Debug)]
pub enum Stream {
    Buffered(BufferedStream),
    Window(WindowStream),
}

impl Stream {
    /// Cursor over a complete in-memory text.
    pub fn from_text(text: &str) -> Self {
        Self::Buffered(BufferedStream::new(text))
    }

    /// Cursor over a sequential reader with the default window.
    ///
    /// [`reset`](CharStream::reset) cannot rewind such a source.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::Window(WindowStream::new(reader))
    }

    /// Cursor over a seekable reader with the default window.
    pub fn from_seekable(reader: impl Read + Seek + 'static) -> Self {
        Self::Window(WindowStream::seekable(reader))
    }

    /// Cursor over a sequential reader with an explicit window size.
    pub fn from_reader_with(reader: impl Read + 'static, config: WindowConfig) -> Self {
        Self::Window(WindowStream::with_config(reader, config))
    }

    /// The byte fast path, when the source is byte-addressable.
    pub fn bytes_mut(&mut self) -> Option<&mut BufferedStream> {
        match self {
            Self::Buffered(stream) => Some(stream),
            Self::Window(_) => None,
        }
    }

    /// `true` when a window cursor sits before the retained window, where
    /// reads return `None` although the input has not ended.
    pub fn is_evicted(&self) -> bool {
        match self {
            Self::Buffered(_) => false,
            Self::Window(stream) => stream.is_evicted(),
        }
    }

    /// Reader failure latched by a window, if any.
    ///
    /// A latched failure is otherwise indistinguishable from end of input.
    pub fn latched_error(&self) -> Option<StreamError> {
        match self {
            Self::Buffered(_) => None,
            Self::Window(stream) => stream.latched_error(),
        }
    }
}

impl CharStream for Stream {
    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        match self {
            Self::Buffered(s) => s.peek_char(),
            Self::Window(s) => s.peek_char(),
        }
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        match self {
            Self::Buffered(s) => s.next_char(),
            Self::Window(s) => s.next_char(),
        }
    }

    fn is_at_end(&mut self) -> bool {
        match self {
            Self::Buffered(s) => s.is_at_end(),
            Self::Window(s) => s.is_at_end(),
        }
    }

    #[inline]
    fn position(&self) -> Position {
        match self {
            Self::Buffered(s) => s.position(),
            Self::Window(s) => s.position(),
        }
    }

    fn merge(&mut self, other: &Self) {
        match (self, other) {
            (Self::Buffered(s), Self::Buffered(o)) => s.merge(o),
            (Self::Window(s), Self::Window(o)) => s.merge(o),
            _ => panic!("cannot merge a buffered cursor with a window cursor"),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Buffered(s) => s.reset(),
            Self::Window(s) => s.reset(),
        }
    }
}

impl From<BufferedStream> for Stream {
    fn from(stream: BufferedStream) -> Self {
        Self::Buffered(stream)
    }
}

impl From<WindowStream> for Stream {
    fn from(stream: WindowStream) -> Self {
        Self::Window(stream)
    }
}

#[cfg(test)]
mod tests;
