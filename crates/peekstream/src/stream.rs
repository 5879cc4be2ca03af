//! The character stream: lookahead, a single mark, and position tracking
//! over any [`CharSource`].
//!
//! Invariants
//! - `current` counts exactly the characters handed out by `read`/`skip`
//!   since creation; peeking never touches it.
//! - `marked` is `current` as of the last `mark()`, or zero.
//! - The source always holds the `mark` checkpoint while the stream is open.
//!   Each peek takes and releases its own checkpoint, so lookahead never
//!   disturbs the mark.

use std::io::Read;

use tracing::{debug, trace};

use crate::{
    CharSource, CheckpointBuffer, Matcher, Position, StrSource, StreamError, StreamOptions,
    Utf8Reader, source::Checkpoint,
};

/// Where characters come from: the caller's source when it can rewind on
/// its own, otherwise that source behind a [`CheckpointBuffer`].
#[derive(Debug)]
enum Backing<S> {
    Native(S),
    Buffered(CheckpointBuffer<S>),
}

impl<S: CharSource> Backing<S> {
    fn new(source: S, options: &StreamOptions) -> Self {
        if source.supports_checkpoint() {
            Backing::Native(source)
        } else {
            debug!(
                capacity = options.buffer_capacity,
                "source cannot rewind, buffering it"
            );
            Backing::Buffered(CheckpointBuffer::with_capacity(
                source,
                options.buffer_capacity,
            ))
        }
    }

    fn as_source(&mut self) -> &mut dyn CharSource {
        match self {
            Backing::Native(s) => s,
            Backing::Buffered(b) => b,
        }
    }
}

/// A stream of characters with arbitrary lookahead, one mark/reset
/// checkpoint, and offset/line/column tracking.
///
/// End of stream is `None`, never an error, and reading past it is
/// harmless: every further `read` returns `None` and leaves the position
/// alone.
///
/// Not thread safe. Share it behind a `Mutex` if several threads need it.
///
/// ```rust
/// use peekstream::{CharacterStream, Match};
///
/// let mut stream = CharacterStream::from_text("let x\n  = 1").unwrap();
/// assert!(stream.peek_and_match("let").unwrap());
///
/// stream.mark().unwrap();
/// stream.skip(5).unwrap();
/// assert!(stream.is_at_new_line().unwrap());
/// stream.skip_matching(Match::Whitespace).unwrap();
/// assert_eq!(stream.current_position().to_string(), "[8:1:2]");
///
/// stream.reset().unwrap();
/// assert_eq!(stream.read().unwrap(), Some('l'));
/// ```
#[derive(Debug)]
pub struct CharacterStream<S: CharSource> {
    source: Option<Backing<S>>,
    current: Position,
    marked: Position,
    mark: Checkpoint,
    options: StreamOptions,
}

impl<'src> CharacterStream<StrSource<'src>> {
    /// A stream over borrowed text.
    pub fn from_text(text: &'src str) -> Result<Self, StreamError> {
        Self::new(StrSource::new(text))
    }
}

impl<R: Read> CharacterStream<Utf8Reader<R>> {
    /// A stream decoding UTF-8 from `reader`.
    pub fn from_reader(reader: R) -> Result<Self, StreamError> {
        Self::new(Utf8Reader::new(reader))
    }
}

impl<S: CharSource> CharacterStream<S> {
    /// Wraps `source` with default options.
    pub fn new(source: S) -> Result<Self, StreamError> {
        Self::with_options(source, StreamOptions::default())
    }

    /// Wraps `source`. Sources without checkpoint support are buffered
    /// transparently.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot set the initial checkpoint that lets
    /// [`reset`](Self::reset) return to the start before any mark.
    pub fn with_options(source: S, options: StreamOptions) -> Result<Self, StreamError> {
        let mut backing = Backing::new(source, &options);
        let mark = backing.as_source().checkpoint(options.mark_read_limit)?;
        Ok(Self {
            source: Some(backing),
            current: Position::new(),
            marked: Position::new(),
            mark,
            options,
        })
    }

    /// The options the stream was built with.
    #[must_use]
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Position after the characters consumed so far.
    #[must_use]
    pub fn current_position(&self) -> Position {
        self.current
    }

    /// Position captured by the last [`mark`](Self::mark), or zero.
    #[must_use]
    pub fn marked_position(&self) -> Position {
        self.marked
    }

    fn source(&mut self) -> Result<&mut dyn CharSource, StreamError> {
        self.source
            .as_mut()
            .map(Backing::as_source)
            .ok_or(StreamError::Closed)
    }

    /// The next character, without consuming it. `None` at end of stream.
    pub fn peek(&mut self) -> Result<Option<char>, StreamError> {
        Ok(self.peek_n(1)?.first().copied())
    }

    /// Up to `count` upcoming characters, without consuming them.
    ///
    /// Fewer are returned when the stream ends first; the result is never
    /// padded. Neither position changes, and the mark is left as it was.
    /// `usize::MAX` asks for everything left.
    pub fn peek_n(&mut self, count: usize) -> Result<Vec<char>, StreamError> {
        let reserve = count.min(self.options.buffer_capacity);
        let source = self.source()?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let checkpoint = source.checkpoint(count)?;
        let mut ahead = Vec::with_capacity(reserve);
        let filled = source.read_chars(&mut ahead, count);
        // Put the cursor back even when the read failed part way.
        let rewound = source.rewind(&checkpoint);
        source.release(checkpoint);
        filled?;
        rewound?;
        Ok(ahead)
    }

    /// [`peek_n`](Self::peek_n) collected into a `String`.
    pub fn peek_string(&mut self, count: usize) -> Result<String, StreamError> {
        Ok(self.peek_n(count)?.into_iter().collect())
    }

    /// Whether the next characters are exactly `text`. Running out of input
    /// first is a plain `false`.
    pub fn peek_and_match(&mut self, text: &str) -> Result<bool, StreamError> {
        let ahead = self.peek_n(text.chars().count())?;
        Ok(ahead.iter().copied().eq(text.chars()))
    }

    /// Whether every character has been consumed.
    pub fn is_at_eof(&mut self) -> Result<bool, StreamError> {
        Ok(self.peek()?.is_none())
    }

    /// Whether the stream is positioned at `"\n"` or `"\r\n"`. A `'\r'` on
    /// its own does not count.
    pub fn is_at_new_line(&mut self) -> Result<bool, StreamError> {
        let ahead = self.peek_n(2)?;
        Ok(matches!(ahead.as_slice(), ['\n', ..] | ['\r', '\n']))
    }

    /// Consumes and returns the next character, advancing the current
    /// position. `None` at end of stream, as many times as it is called.
    pub fn read(&mut self) -> Result<Option<char>, StreamError> {
        let ch = self.source()?.read_char()?;
        match ch {
            Some('\n') => self.current.advance_to_new_line(),
            Some(_) => self.current.advance_in_line(),
            None => {}
        }
        Ok(ch)
    }

    /// Borrows the stream as an iterator of characters. The stream keeps
    /// its position once the iterator is dropped.
    pub fn chars(&mut self) -> Chars<'_, S> {
        Chars { stream: self }
    }

    /// Consumes `count` characters, or as many as remain.
    pub fn skip(&mut self, count: usize) -> Result<(), StreamError> {
        for _ in 0..count {
            if self.read()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Consumes characters while `matcher` accepts them and returns how many
    /// were consumed. The first rejected character stays in the stream.
    pub fn skip_matching(&mut self, matcher: impl Matcher) -> Result<usize, StreamError> {
        let mut skipped = 0;
        while let Some(ch) = self.peek()? {
            if !matcher.matches(ch) {
                break;
            }
            self.read()?;
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Remembers the current position. A later [`reset`](Self::reset)
    /// returns here. Replaces any earlier mark.
    pub fn mark(&mut self) -> Result<(), StreamError> {
        let limit = self.options.mark_read_limit;
        let checkpoint = self.source()?.checkpoint(limit)?;
        let previous = std::mem::replace(&mut self.mark, checkpoint);
        self.source()?.release(previous);
        self.marked = self.current;
        trace!(offset = self.marked.offset(), "mark");
        Ok(())
    }

    /// Rewinds to the last mark, or to the start if nothing was marked.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidCheckpoint`] when the source read further past
    /// the mark than [`StreamOptions::mark_read_limit`] allows.
    pub fn reset(&mut self) -> Result<(), StreamError> {
        let mark = self.mark;
        self.source()?.rewind(&mark)?;
        self.current = self.marked;
        trace!(offset = self.current.offset(), "reset");
        Ok(())
    }

    /// Releases the underlying source. Reads, peeks, skips, marks and resets
    /// fail with [`StreamError::Closed`] afterwards. Closing twice is a
    /// no-op.
    ///
    /// Dropping an open stream closes it as well, but any error the source
    /// reports then is only logged.
    pub fn close(&mut self) -> Result<(), StreamError> {
        let Some(mut backing) = self.source.take() else {
            return Ok(());
        };
        trace!(offset = self.current.offset(), "close");
        let source = backing.as_source();
        source.release(self.mark);
        source.close()
    }
}

impl<S: CharSource> Drop for CharacterStream<S> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            debug!(%err, "closing source on drop failed");
        }
    }
}

/// Iterator over the characters of a [`CharacterStream`], returned by
/// [`CharacterStream::chars`].
///
/// Each item consumes a character exactly like
/// [`read`](CharacterStream::read). Iteration ends at end of stream, and a
/// closed stream yields nothing.
#[derive(Debug)]
pub struct Chars<'a, S: CharSource> {
    stream: &'a mut CharacterStream<S>,
}

impl<S: CharSource> Iterator for Chars<'_, S> {
    type Item = Result<char, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stream.is_closed() {
            return None;
        }
        self.stream.read().transpose()
    }
}
