use super::{CharSource, Checkpoint};
use crate::StreamError;

/// A source over borrowed text, with native checkpoints.
///
/// The whole text is always at hand, so checkpoints never expire and their
/// read limit is ignored.
#[derive(Debug, Clone)]
pub struct StrSource<'src> {
    text: &'src str,
    byte_idx: usize,
}

impl<'src> StrSource<'src> {
    /// Creates a source positioned at the start of `text`.
    #[must_use]
    pub const fn new(text: &'src str) -> Self {
        Self { text, byte_idx: 0 }
    }

    /// The part of the text not read yet.
    #[must_use]
    pub fn remaining(&self) -> &'src str {
        &self.text[self.byte_idx..]
    }
}

impl<'src> From<&'src str> for StrSource<'src> {
    fn from(text: &'src str) -> Self {
        Self::new(text)
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn read_char(&mut self) -> Result<Option<char>, StreamError> {
        let ch = self.remaining().chars().next();
        if let Some(c) = ch {
            self.byte_idx += c.len_utf8();
        }
        Ok(ch)
    }

    fn read_chars(&mut self, buf: &mut Vec<char>, count: usize) -> Result<usize, StreamError> {
        let before = buf.len();
        let mut end = self.byte_idx;
        for c in self.remaining().chars().take(count) {
            buf.push(c);
            end += c.len_utf8();
        }
        self.byte_idx = end;
        Ok(buf.len() - before)
    }

    fn supports_checkpoint(&self) -> bool {
        true
    }

    fn checkpoint(&mut self, read_limit: usize) -> Result<Checkpoint, StreamError> {
        Ok(Checkpoint::new(self.byte_idx, read_limit))
    }

    fn rewind(&mut self, checkpoint: &Checkpoint) -> Result<(), StreamError> {
        let cursor = checkpoint.cursor();
        if !self.text.is_char_boundary(cursor) {
            return Err(StreamError::InvalidCheckpoint { cursor });
        }
        self.byte_idx = cursor;
        Ok(())
    }
}
