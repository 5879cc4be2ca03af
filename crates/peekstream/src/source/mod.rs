//! Character sources a [`CharacterStream`](crate::CharacterStream) can wrap.
//!
//! A source only has to hand out characters one at a time. Sources that can
//! also rewind report it through [`CharSource::supports_checkpoint`]; the
//! stream wraps every other source in a [`CheckpointBuffer`] so lookahead
//! and `mark`/`reset` work the same way everywhere.
//!
//! A source may hold several checkpoints at once. The stream keeps one for
//! its mark and takes a short-lived one for each peek, so peeking never
//! disturbs the mark.

mod checkpoint_buffer;
mod iter;
mod str_source;
mod utf8;

pub use checkpoint_buffer::CheckpointBuffer;
pub use iter::IterSource;
pub use str_source::StrSource;
pub use utf8::Utf8Reader;

use crate::StreamError;

/// A saved read cursor on a [`CharSource`].
///
/// `cursor` is meaningful only to the source that issued it: a byte index
/// for [`StrSource`], a character offset for [`CheckpointBuffer`].
/// `read_limit` is how far the source may read past the cursor before it is
/// allowed to forget the checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    cursor: usize,
    read_limit: usize,
}

impl Checkpoint {
    /// Creates a checkpoint token. Meant for [`CharSource`] implementors.
    #[must_use]
    pub const fn new(cursor: usize, read_limit: usize) -> Self {
        Self { cursor, read_limit }
    }

    /// The source-specific cursor this checkpoint rewinds to.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// How many characters may be read past the cursor while the checkpoint
    /// stays valid.
    #[must_use]
    pub const fn read_limit(&self) -> usize {
        self.read_limit
    }
}

/// A sequential supplier of characters.
///
/// Only [`read_char`](CharSource::read_char) is required. Once it returns
/// `Ok(None)` it must keep doing so.
pub trait CharSource {
    /// Consumes and returns the next character, or `None` at the end of the
    /// source.
    fn read_char(&mut self) -> Result<Option<char>, StreamError>;

    /// Reads up to `count` characters into `buf`, stopping early at the end
    /// of the source. Returns how many were appended.
    fn read_chars(&mut self, buf: &mut Vec<char>, count: usize) -> Result<usize, StreamError> {
        let mut read = 0;
        while read < count {
            match self.read_char()? {
                Some(ch) => buf.push(ch),
                None => break,
            }
            read += 1;
        }
        Ok(read)
    }

    /// Whether [`checkpoint`](CharSource::checkpoint) and
    /// [`rewind`](CharSource::rewind) are available.
    fn supports_checkpoint(&self) -> bool {
        false
    }

    /// Saves the current read cursor. The checkpoint stays valid for at least
    /// `read_limit` further characters.
    fn checkpoint(&mut self, read_limit: usize) -> Result<Checkpoint, StreamError> {
        let _ = read_limit;
        Err(StreamError::CheckpointUnsupported)
    }

    /// Moves the read cursor back to `checkpoint`. The checkpoint stays held
    /// and can be rewound to again.
    fn rewind(&mut self, checkpoint: &Checkpoint) -> Result<(), StreamError> {
        let _ = checkpoint;
        Err(StreamError::CheckpointUnsupported)
    }

    /// Tells the source `checkpoint` will not be rewound to again.
    fn release(&mut self, checkpoint: Checkpoint) {
        let _ = checkpoint;
    }

    /// Releases whatever the source holds. Nothing is read afterwards.
    fn close(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read_char(&mut self) -> Result<Option<char>, StreamError> {
        (**self).read_char()
    }

    fn read_chars(&mut self, buf: &mut Vec<char>, count: usize) -> Result<usize, StreamError> {
        (**self).read_chars(buf, count)
    }

    fn supports_checkpoint(&self) -> bool {
        (**self).supports_checkpoint()
    }

    fn checkpoint(&mut self, read_limit: usize) -> Result<Checkpoint, StreamError> {
        (**self).checkpoint(read_limit)
    }

    fn rewind(&mut self, checkpoint: &Checkpoint) -> Result<(), StreamError> {
        (**self).rewind(checkpoint)
    }

    fn release(&mut self, checkpoint: Checkpoint) {
        (**self).release(checkpoint);
    }

    fn close(&mut self) -> Result<(), StreamError> {
        (**self).close()
    }
}
