//! Sliding-window cursor over an incremental reader.
//!
//! Decoded characters, the global offset of the first retained character,
//! the end-of-input flag, any latched reader error and the reader itself
//! live in one [`Window`] behind `Rc<RefCell<..>>`. Every clone derived
//! from a root shares it, so a refill or discard through any clone is
//! visible to all of them. Only the [`Position`] is private per clone.
//!
//! # Discarding
//!
//! Before a refill the requesting cursor drops consumed characters: once
//! the window holds `capacity` characters and the cursor sits more than
//! `keep_behind` characters into it, everything before
//! `cursor - keep_behind` is released. The threshold is measured from the
//! requesting cursor only, so a clone lagging further behind than
//! `keep_behind` loses its data; reads at an evicted offset return `None`.
//! The same holds for a tokenizer snapshot: a single token longer than
//! `keep_behind` cannot be replayed from a window.
//!
//! A seekable [`reset`](CharStream::reset) through one clone empties the
//! window for all of them; clones still positioned past the new window end
//! read `None` until they are reset or merged.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::CharStream;
use crate::{Position, StreamError, WindowConfig};

/// A reader that can also seek, erased behind one trait object.
trait SeekRead: Read + Seek {}

impl<T: Read + Seek> SeekRead for T {}

enum Source {
    Sequential(Box<dyn Read>),
    Seekable(Box<dyn SeekRead>),
}

impl Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Sequential(r) => r.read(buf),
            Self::Seekable(r) => r.read(buf),
        }
    }
}

/// State shared by every clone of one root [`WindowStream`].
struct Window {
    source: Source,
    config: WindowConfig,
    /// Decoded characters, starting at global rune offset `start`.
    chars: Vec<char>,
    start: usize,
    /// Undecoded bytes carried over from the previous chunk.
    pending: Vec<u8>,
    chunk: Box<[u8]>,
    eof: bool,
    error: Option<StreamError>,
}

impl Window {
    fn new(source: Source, config: WindowConfig) -> Self {
        Self {
            source,
            config,
            chars: Vec::new(),
            start: 0,
            pending: Vec::new(),
            chunk: vec![0; config.chunk_size()].into_boxed_slice(),
            eof: false,
            error: None,
        }
    }

    /// Character at global rune offset `offset`, refilling as needed.
    fn char_at(&mut self, offset: usize) -> Option<char> {
        loop {
            if offset < self.start {
                warn!(
                    offset,
                    window_start = self.start,
                    "read before the retained window; data was already discarded"
                );
                return None;
            }
            if let Some(&ch) = self.chars.get(offset - self.start) {
                return Some(ch);
            }
            if self.eof {
                return None;
            }
            // Cursors read sequentially, so a gap means the window was
            // rewound underneath this cursor.
            if offset > self.start + self.chars.len() {
                warn!(
                    offset,
                    window_end = self.start + self.chars.len(),
                    "read past the retained window; the source was rewound"
                );
                return None;
            }
            self.discard_before(offset);
            self.refill();
        }
    }

    /// Drop consumed characters ahead of a refill requested at `cursor`.
    fn discard_before(&mut self, cursor: usize) {
        let relative = cursor - self.start;
        let keep_behind = self.config.keep_behind();
        if self.chars.len() < self.config.capacity() || relative <= keep_behind {
            return;
        }
        let dropped = relative - keep_behind;
        self.chars.drain(..dropped);
        self.start += dropped;
        debug!(
            dropped,
            window_start = self.start,
            retained = self.chars.len(),
            "discarded consumed window data"
        );
    }

    /// Read chunks until the window reaches capacity or the source ends.
    fn refill(&mut self) {
        while !self.eof && self.chars.len() < self.config.capacity() {
            match self.source.read(&mut self.chunk) {
                Ok(0) => {
                    decode_utf8(&mut self.pending, &mut self.chars, true);
                    self.eof = true;
                }
                Ok(n) => {
                    self.pending.extend_from_slice(&self.chunk[..n]);
                    decode_utf8(&mut self.pending, &mut self.chars, false);
                    trace!(bytes = n, retained = self.chars.len(), "window refill");
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    warn!(error = %err, "reader failed; treating as end of input");
                    self.error = Some(StreamError::read(&err));
                    self.eof = true;
                }
            }
        }
    }

    /// Rewind the source to byte 0 and empty the window.
    ///
    /// Returns `false` if the source cannot seek. A failed seek latches
    /// [`StreamError::Seek`] and leaves the window empty at end of input.
    fn rewind(&mut self) -> bool {
        let Source::Seekable(reader) = &mut self.source else {
            return false;
        };
        let sought = reader.seek(SeekFrom::Start(0));
        self.chars.clear();
        self.pending.clear();
        self.start = 0;
        match sought {
            Ok(_) => {
                self.eof = false;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, "seek to start failed; treating as end of input");
                self.error = Some(StreamError::seek(&err));
                self.eof = true;
            }
        }
        true
    }
}

/// Decode as much of `pending` as possible into `out`.
///
/// Invalid sequences are skipped one byte at a time. An incomplete
/// sequence at the end of `pending` is kept for the next chunk, unless
/// `at_eof`, in which case its bytes are skipped too.
fn decode_utf8(pending: &mut Vec<u8>, out: &mut Vec<char>, at_eof: bool) {
    let mut consumed = 0;
    while consumed < pending.len() {
        let rest = &pending[consumed..];
        match std::str::from_utf8(rest) {
            Ok(text) => {
                out.extend(text.chars());
                consumed = pending.len();
            }
            Err(err) => {
                let valid = err.valid_up_to();
                if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                    out.extend(text.chars());
                }
                consumed += valid;
                match err.error_len() {
                    Some(_) => consumed += 1,
                    None if at_eof => consumed += 1,
                    None => break,
                }
            }
        }
    }
    pending.drain(..consumed);
}

/// Cursor over a reader, retaining a bounded window of decoded text.
///
/// Memory use is bounded by [`WindowConfig::max_retained`] regardless of
/// input size. Clones share the window; see the module docs for the
/// discard rule and its effect on lagging clones.
#[derive(Clone)]
pub struct WindowStream {
    shared: Rc<RefCell<Window>>,
    pos: Position,
}

impl WindowStream {
    /// Window over a sequential reader with the default configuration.
    pub fn new(reader: impl Read + 'static) -> Self {
        Self::with_config(reader, WindowConfig::default())
    }

    /// Window over a sequential reader.
    pub fn with_config(reader: impl Read + 'static, config: WindowConfig) -> Self {
        Self::from_source(Source::Sequential(Box::new(reader)), config)
    }

    /// Window over a seekable reader, which makes [`reset`](CharStream::reset)
    /// rewind the data as well as the position.
    pub fn seekable(reader: impl Read + Seek + 'static) -> Self {
        Self::seekable_with_config(reader, WindowConfig::default())
    }

    pub fn seekable_with_config(reader: impl Read + Seek + 'static, config: WindowConfig) -> Self {
        Self::from_source(Source::Seekable(Box::new(reader)), config)
    }

    fn from_source(source: Source, config: WindowConfig) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Window::new(source, config))),
            pos: Position::START,
        }
    }

    /// Reader failure latched by any clone of this stream.
    pub fn latched_error(&self) -> Option<StreamError> {
        self.shared.borrow().error.clone()
    }

    /// Characters currently held in the shared window.
    pub fn buffered_len(&self) -> usize {
        self.shared.borrow().chars.len()
    }

    /// Global rune offset of the first retained character.
    pub fn buffer_start(&self) -> usize {
        self.shared.borrow().start
    }

    /// `true` when this cursor's position was already discarded, so reads
    /// return `None` even though the input may continue.
    pub fn is_evicted(&self) -> bool {
        self.pos.offset < self.shared.borrow().start
    }

    pub fn config(&self) -> WindowConfig {
        self.shared.borrow().config
    }
}

impl CharStream for WindowStream {
    fn peek_char(&mut self) -> Option<char> {
        self.shared.borrow_mut().char_at(self.pos.offset)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.shared.borrow_mut().char_at(self.pos.offset)?;
        self.pos.advance(ch);
        Some(ch)
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn merge(&mut self, other: &Self) {
        assert!(
            Rc::ptr_eq(&self.shared, &other.shared),
            "cannot merge cursors over different sources"
        );
        self.pos = other.pos;
    }

    /// Rewind to the start.
    ///
    /// A seekable source is rewound and the window emptied; if the seek
    /// fails the error is latched and the stream reads as end of input. A
    /// sequential source cannot be re-read: only the position is reset,
    /// which is unsound once any data has been discarded.
    fn reset(&mut self) {
        if !self.shared.borrow_mut().rewind() {
            warn!("reset on a source that cannot rewind; only the position is reset");
        }
        self.pos = Position::START;
    }
}

impl fmt::Debug for WindowStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let window = self.shared.borrow();
        f.debug_struct("WindowStream")
            .field("pos", &self.pos)
            .field("window_start", &window.start)
            .field("buffered", &window.chars.len())
            .field("eof", &window.eof)
            .field("error", &window.error)
            .finish()
    }
}
