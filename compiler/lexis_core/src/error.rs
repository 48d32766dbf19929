//! Errors surfaced by streams and their configuration.
//!
//! Ordinary control flow never produces these: "no match" and end of
//! input are `None`. A [`StreamError`] is either a rejected configuration or
//! a reader failure latched by a [`WindowStream`](crate::WindowStream).

use std::io;

use thiserror::Error;

/// Failure reported by stream construction or latched from a reader.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The underlying reader failed with something other than EOF.
    ///
    /// Once latched, the stream behaves as if it had reached end of input.
    #[error("read failed ({kind:?}): {message}")]
    Read { kind: io::ErrorKind, message: String },

    /// A seekable source could not be rewound by `reset()`.
    #[error("seek to start failed ({kind:?}): {message}")]
    Seek { kind: io::ErrorKind, message: String },

    /// The window must retain fewer characters behind the cursor than it
    /// can hold in total.
    #[error("window keeps {keep_behind} characters behind the cursor but holds only {capacity}")]
    InvalidWindow { capacity: usize, keep_behind: usize },

    /// Refills must read at least one byte per chunk.
    #[error("window chunk size must be non-zero")]
    ZeroChunk,
}

impl StreamError {
    pub(crate) fn read(err: &io::Error) -> Self {
        Self::Read {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub(crate) fn seek(err: &io::Error) -> Self {
        Self::Seek {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
