//! Character streams and SWAR byte scanning for the lexis tokenizer.
//!
//! This crate has no dependency on the tokenizer. Tools that only need a
//! cursor over text (or over an unbounded reader) can use it directly.
//!
//! # Layers
//!
//! - [`swar`]: word-at-a-time byte scanners with scalar tails.
//! - [`Position`]: rune offset plus 1-indexed row and column.
//! - [`Stream`]: a cursor over in-memory text ([`BufferedStream`]) or a
//!   bounded window over a reader ([`WindowStream`]), driven through the
//!   [`CharStream`] contract. Buffered text also offers the [`ByteStream`]
//!   fast path.
//!
//! Nothing here is thread-safe: clones of a window share its buffer through
//! `Rc<RefCell<..>>`.

mod config;
mod error;
mod position;
pub mod stream;
pub mod swar;

pub use config::{WindowConfig, DEFAULT_CAPACITY, DEFAULT_CHUNK_SIZE};
pub use error::StreamError;
pub use position::Position;
pub use stream::{BufferedStream, ByteStream, CharStream, Stream, WindowStream};
