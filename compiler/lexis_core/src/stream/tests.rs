use std::io::Cursor;

use super::*;

// === Stream enum ===

#[test]
fn from_text_exposes_byte_path() {
    let mut s = Stream::from_text("  x");
    let bytes = s.bytes_mut();
    assert!(bytes.is_some());
    if let Some(bytes) = bytes {
        assert_eq!(bytes.skip_whitespace(), 2);
    }
    assert_eq!(s.peek_char(), Some('x'));
    assert_eq!(s.column(), 3);
}

#[test]
fn reader_stream_has_no_byte_path() {
    let mut s = Stream::from_reader(Cursor::new(b"x".to_vec()));
    assert!(s.bytes_mut().is_none());
    assert_eq!(s.next_char(), Some('x'));
    assert!(s.is_at_end());
    assert_eq!(s.latched_error(), None);
}

#[test]
fn seekable_stream_resets() {
    let mut s = Stream::from_seekable(Cursor::new(b"ab".to_vec()));
    assert!(s.match_chars("ab"));
    s.reset();
    assert_eq!(s.offset(), 0);
    assert_eq!(s.next_char(), Some('a'));
}

#[test]
#[should_panic(expected = "cannot merge a buffered cursor with a window cursor")]
fn merge_across_variants_panics() {
    let mut a = Stream::from_text("a");
    let b = Stream::from_reader(Cursor::new(b"a".to_vec()));
    a.merge(&b);
}

#[test]
fn evicted_window_cursor_is_reported() -> Result<(), StreamError> {
    let config = WindowConfig::new(8, 2, 2)?;
    let mut lead = Stream::from_reader_with(Cursor::new(vec![b'z'; 40]), config);
    let lagging = lead.clone();
    for _ in 0..20 {
        lead.next_char();
    }
    assert!(lagging.is_evicted());
    assert!(!lead.is_evicted());
    assert!(!Stream::from_text("z").is_evicted());
    Ok(())
}

#[test]
fn conversions_wrap_variants() {
    assert!(matches!(
        Stream::from(BufferedStream::new("")),
        Stream::Buffered(_)
    ));
    assert!(matches!(
        Stream::from(WindowStream::new(std::io::empty())),
        Stream::Window(_)
    ));
}

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_streams {
    use super::*;
    use proptest::prelude::*;

    fn small_window(text: &str) -> Stream {
        // Tiny window so discards and refills happen on short inputs.
        match WindowConfig::new(8, 3, 2) {
            Ok(config) => Stream::from_reader_with(Cursor::new(text.as_bytes().to_vec()), config),
            Err(err) => panic!("invalid test window: {err}"),
        }
    }

    proptest! {
        #[test]
        fn buffered_and_window_agree(text in "[a-c \\n\\r\\t\u{e9}\u{3b1}\u{1F600}]{0,64}") {
            let mut buffered = Stream::from_text(&text);
            let mut window = small_window(&text);
            loop {
                let a = buffered.next_char();
                let b = window.next_char();
                prop_assert_eq!(a, b);
                prop_assert_eq!(buffered.position(), window.position());
                if a.is_none() {
                    break;
                }
            }
            prop_assert!(buffered.is_at_end());
            prop_assert!(window.is_at_end());
        }

        #[test]
        fn clone_advance_merge_round_trips(
            text in "[a-z\\n\u{e9}]{0,48}",
            steps in 0usize..48,
        ) {
            for mut stream in [Stream::from_text(&text), small_window(&text)] {
                let mut clone = stream.clone();
                for _ in 0..steps {
                    clone.next_char();
                }
                let expected = clone.position();
                stream.merge(&clone);
                prop_assert_eq!(stream.position(), expected);
                prop_assert_eq!(stream.next_char(), clone.next_char());
            }
        }
    }
}
