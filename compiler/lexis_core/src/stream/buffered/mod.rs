//! Fully-buffered cursor over an in-memory text.
//!
//! The text and its rune index live behind an `Rc` shared by every clone;
//! a clone copies only the rune [`Position`] and the byte offset.
//!
//! # Dual Indexing
//!
//! Rune-level reads keep `Position::offset` in characters while the byte
//! path works in bytes. For pure-ASCII text the two coincide. Otherwise a
//! table of rune start offsets is built once at construction, and
//! byte→rune is a binary search over it.
//!
//! The byte cursor always sits on a character boundary. A byte-level step
//! that would stop inside a multi-byte character consumes the rest of that
//! character, so byte and rune reads always resume at the same place.

use std::fmt;
use std::rc::Rc;

use super::{ByteStream, CharStream};
use crate::{swar, Position};

/// Immutable text plus its rune index, shared by all clones.
struct SourceText {
    text: Box<str>,
    /// Byte offset of each rune, followed by `text.len()`.
    /// `None` when the text is pure ASCII.
    rune_starts: Option<Box<[usize]>>,
}

impl SourceText {
    fn new(text: &str) -> Self {
        let rune_starts = if text.is_ascii() {
            None
        } else {
            Some(
                text.char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(text.len()))
                    .collect(),
            )
        };
        Self {
            text: text.into(),
            rune_starts,
        }
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Rune index at the character boundary `byte`.
    #[inline]
    fn rune_of_byte(&self, byte: usize) -> usize {
        match &self.rune_starts {
            None => byte,
            Some(starts) => starts.partition_point(|&start| start < byte),
        }
    }
}

/// Cursor over a complete text. Cloning is O(1).
#[derive(Clone)]
pub struct BufferedStream {
    source: Rc<SourceText>,
    pos: Position,
    /// Byte offset of rune `pos.offset`; always a character boundary.
    byte_pos: usize,
}

impl BufferedStream {
    pub fn new(text: &str) -> Self {
        Self {
            source: Rc::new(SourceText::new(text)),
            pos: Position::START,
            byte_pos: 0,
        }
    }

    /// The whole source text.
    pub fn text(&self) -> &str {
        &self.source.text
    }

    /// `true` when the byte and rune indices coincide.
    pub fn is_ascii(&self) -> bool {
        self.source.rune_starts.is_none()
    }

    /// Move the byte cursor forward to `new_byte`, rounded up to the next
    /// character boundary, recomputing row, column and rune offset from the
    /// bytes skipped. Returns the number of bytes advanced.
    fn advance_to_byte(&mut self, new_byte: usize) -> usize {
        debug_assert!(new_byte >= self.byte_pos, "byte cursor moved backwards");
        let text = &self.source.text;
        let mut new_byte = new_byte.min(text.len());
        while !text.is_char_boundary(new_byte) {
            new_byte += 1;
        }
        let advanced = new_byte - self.byte_pos;
        if advanced == 0 {
            return 0;
        }
        let skipped = &self.source.bytes()[self.byte_pos..new_byte];
        let new_rune = self.source.rune_of_byte(new_byte);

        match memchr::memrchr(b'\n', skipped) {
            Some(last_newline) => {
                let newlines = memchr::memchr_iter(b'\n', skipped).count();
                let line_start = self.source.rune_of_byte(self.byte_pos + last_newline + 1);
                self.pos.row += newlines;
                self.pos.column = new_rune - line_start + 1;
            }
            None => self.pos.column += new_rune - self.pos.offset,
        }

        self.pos.offset = new_rune;
        self.byte_pos = new_byte;
        advanced
    }

    #[inline]
    fn remaining(&self) -> &[u8] {
        &self.source.bytes()[self.byte_pos..]
    }
}

impl CharStream for BufferedStream {
    #[inline]
    fn peek_char(&mut self) -> Option<char> {
        self.source.text[self.byte_pos..].chars().next()
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        let start = self.byte_pos;
        let ch = self.source.text[start..].chars().next()?;
        self.pos.advance(ch);
        self.byte_pos = start + ch.len_utf8();
        Some(ch)
    }

    #[inline]
    fn is_at_end(&mut self) -> bool {
        self.byte_pos >= self.source.text.len()
    }

    #[inline]
    fn position(&self) -> Position {
        self.pos
    }

    fn merge(&mut self, other: &Self) {
        assert!(
            Rc::ptr_eq(&self.source, &other.source),
            "cannot merge cursors over different sources"
        );
        self.pos = other.pos;
        self.byte_pos = other.byte_pos;
    }

    fn reset(&mut self) {
        self.pos = Position::START;
        self.byte_pos = 0;
    }
}

impl ByteStream for BufferedStream {
    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.remaining().first().copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.advance_to_byte(self.byte_pos + 1);
        Some(b)
    }

    fn peek_bytes(&self, n: usize) -> &[u8] {
        let rest = self.remaining();
        &rest[..n.min(rest.len())]
    }

    fn advance_bytes(&mut self, n: usize) -> usize {
        self.advance_to_byte(self.byte_pos + n)
    }

    fn skip_whitespace(&mut self) -> usize {
        let n = swar::skip_whitespace(self.remaining());
        self.advance_to_byte(self.byte_pos + n)
    }

    fn skip_until(&mut self, delim: u8) -> usize {
        let rest = self.remaining();
        let n = swar::find_byte(rest, delim).unwrap_or(rest.len());
        self.advance_to_byte(self.byte_pos + n)
    }

    fn find_byte(&self, needle: u8) -> Option<usize> {
        swar::find_byte(self.remaining(), needle)
    }

    fn find_any(&self, targets: &[u8]) -> Option<usize> {
        swar::find_any_byte(self.remaining(), targets)
    }

    fn slice_from(&self, start: usize) -> &[u8] {
        &self.source.bytes()[start.min(self.byte_pos)..self.byte_pos]
    }

    #[inline]
    fn byte_position(&self) -> usize {
        self.byte_pos
    }

    #[inline]
    fn remaining_bytes(&self) -> usize {
        self.source.bytes().len() - self.byte_pos
    }
}

impl fmt::Debug for BufferedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedStream")
            .field("len", &self.source.text.len())
            .field("pos", &self.pos)
            .field("byte_pos", &self.byte_pos)
            .finish()
    }
}
