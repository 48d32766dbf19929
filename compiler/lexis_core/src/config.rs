//! Sliding-window sizing.

use crate::StreamError;

/// Default number of decoded characters a window retains.
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Default number of bytes requested from the reader per read call.
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Sizing for a [`WindowStream`](crate::WindowStream).
///
/// A window retains at most `capacity + chunk_size` characters: refills stop
/// once `capacity` is reached, and a single chunk decodes to at most
/// `chunk_size` characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    capacity: usize,
    chunk_size: usize,
    keep_behind: usize,
}

impl WindowConfig {
    /// Validated configuration.
    ///
    /// `keep_behind` is how many already-consumed characters survive a
    /// discard, measured back from the cursor that triggers it.
    pub fn new(capacity: usize, chunk_size: usize, keep_behind: usize) -> Result<Self, StreamError> {
        if chunk_size == 0 {
            return Err(StreamError::ZeroChunk);
        }
        if keep_behind >= capacity {
            return Err(StreamError::InvalidWindow {
                capacity,
                keep_behind,
            });
        }
        Ok(Self {
            capacity,
            chunk_size,
            keep_behind,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn keep_behind(&self) -> usize {
        self.keep_behind
    }

    /// Upper bound on characters held in the window at any time.
    pub fn max_retained(&self) -> usize {
        self.capacity + self.chunk_size
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            keep_behind: DEFAULT_CAPACITY / 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_an_eighth() {
        let config = WindowConfig::default();
        assert_eq!(config.capacity(), DEFAULT_CAPACITY);
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.keep_behind(), DEFAULT_CAPACITY / 8);
        assert_eq!(config.max_retained(), DEFAULT_CAPACITY + DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn rejects_zero_chunk() {
        assert_eq!(WindowConfig::new(64, 0, 8), Err(StreamError::ZeroChunk));
    }

    #[test]
    fn rejects_keep_behind_at_capacity() {
        assert_eq!(
            WindowConfig::new(64, 16, 64),
            Err(StreamError::InvalidWindow {
                capacity: 64,
                keep_behind: 64,
            })
        );
    }

    #[test]
    fn accepts_small_window() {
        let config = WindowConfig::new(32, 8, 4);
        assert_eq!(config.map(|c| c.max_retained()), Ok(40));
    }
}
