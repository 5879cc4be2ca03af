use std::io::{self, BufReader, Read};

use super::CharSource;
use crate::StreamError;

/// Decodes UTF-8 from a byte reader, one scalar at a time.
///
/// Malformed or truncated sequences fail with
/// [`StreamError::InvalidUtf8`]; nothing is replaced or guessed. The reader
/// is buffered internally, so wrapping a raw `File` is fine.
#[derive(Debug)]
pub struct Utf8Reader<R> {
    reader: BufReader<R>,
    byte_offset: usize,
    done: bool,
}

impl<R: Read> Utf8Reader<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            byte_offset: 0,
            done: false,
        }
    }

    /// Bytes consumed from the reader so far.
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Returns the wrapped reader. Bytes already buffered are lost.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Length of the sequence a lead byte starts, or `None` for bytes that
/// cannot start one (continuation bytes, overlong leads, out of range).
fn sequence_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: Read> CharSource for Utf8Reader<R> {
    fn read_char(&mut self) -> Result<Option<char>, StreamError> {
        if self.done {
            return Ok(None);
        }
        let offset = self.byte_offset;
        let Some(lead) = self.read_byte()? else {
            self.done = true;
            return Ok(None);
        };
        self.byte_offset += 1;

        let width = sequence_width(lead).ok_or(StreamError::InvalidUtf8 { offset })?;
        let mut seq = [lead, 0, 0, 0];
        for slot in &mut seq[1..width] {
            *slot = self
                .read_byte()?
                .ok_or(StreamError::InvalidUtf8 { offset })?;
            self.byte_offset += 1;
        }

        match bstr::decode_utf8(&seq[..width]) {
            (Some(ch), len) if len == width => Ok(Some(ch)),
            _ => Err(StreamError::InvalidUtf8 { offset }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn decode_all(bytes: &[u8]) -> Result<String, StreamError> {
        let mut reader = Utf8Reader::new(bytes);
        let mut out = String::new();
        while let Some(c) = reader.read_char()? {
            out.push(c);
        }
        Ok(out)
    }

    #[test]
    fn decodes_every_sequence_width() {
        let text = "a\u{e9}\u{4e2d}\u{1f389}";
        assert_eq!(decode_all(text.as_bytes()).unwrap(), text);
    }

    #[rstest]
    #[case::stray_continuation(b"ab\x80", 2)]
    #[case::overlong_lead(b"\xC0\xAF", 0)]
    #[case::truncated_at_end(b"x\xF0\x9F\x8E", 1)]
    #[case::bad_continuation(b"\xE4\x41\x41", 0)]
    #[case::surrogate(b"\xED\xA0\x80", 0)]
    #[case::beyond_unicode(b"\xF5\x80\x80\x80", 0)]
    fn reports_offset_of_bad_sequence(#[case] bytes: &[u8], #[case] expected: usize) {
        match decode_all(bytes) {
            Err(StreamError::InvalidUtf8 { offset }) => assert_eq!(offset, expected),
            other => panic!("expected invalid utf-8, got {other:?}"),
        }
    }

    #[test]
    fn end_of_input_is_sticky() {
        let mut reader = Utf8Reader::new(&b"z"[..]);
        assert_eq!(reader.read_char().unwrap(), Some('z'));
        assert_eq!(reader.read_char().unwrap(), None);
        assert_eq!(reader.read_char().unwrap(), None);
        assert_eq!(reader.byte_offset(), 1);
    }

    #[test]
    fn has_no_checkpoints() {
        let mut reader = Utf8Reader::new(&b""[..]);
        assert!(!reader.supports_checkpoint());
        assert!(matches!(
            reader.checkpoint(1),
            Err(StreamError::CheckpointUnsupported)
        ));
    }
}
