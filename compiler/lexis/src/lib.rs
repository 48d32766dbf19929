//! Matcher-driven tokenizer for hand-written parsers of schema formats.
//!
//! A [`Tokenizer`] owns a [`Stream`] and an ordered list of [`Matcher`]s.
//! Matchers are plain closures; the factories in [`matcher`] cover single
//! characters, literals, character classes and [`Pattern`] combinators.
//!
//! ```ignore
//! let mut tokenizer = Tokenizer::new(vec![
//!     char_matcher(Kind::LBrace, '{'),
//!     string_matcher(Kind::Null, "null"),
//!     class_matcher(Kind::Ident, char::is_alphanumeric),
//! ]);
//! tokenizer.initialize("{ null }");
//! let (tokens, complete) = tokenizer.tokenize_all();
//! ```
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=lexis=trace`: every emitted token.
//! - `RUST_LOG=lexis_core=debug`: window discards; `warn` shows latched
//!   read errors and evicted reads.
//!
//! Call [`init_tracing`] once to install the subscriber.

pub mod matcher;
pub mod pattern;
mod token;
mod tokenizer;

use std::sync::Once;

pub use lexis_core::{
    BufferedStream, ByteStream, CharStream, Position, Stream, StreamError, WindowConfig,
    WindowStream,
};
pub use matcher::{
    char_matcher, class_matcher, pattern_matcher, string_matcher, whitespace_matcher, Matcher,
};
pub use pattern::{one_of, optional, sequence, Pattern};
pub use token::{Token, TokenKind};
pub use tokenizer::{Tokenizer, TokenizerOptions};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
