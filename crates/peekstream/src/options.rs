/// Configuration options for a [`CharacterStream`](crate::CharacterStream).
///
/// # Examples
///
/// ```rust
/// use peekstream::{CharacterStream, IterSource, StreamOptions};
///
/// let options = StreamOptions {
///     buffer_capacity: 4096,
///     ..Default::default()
/// };
/// let stream = CharacterStream::with_options(IterSource::new("abc".chars()), options).unwrap();
/// assert_eq!(stream.options().buffer_capacity, 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamOptions {
    /// Initial capacity, in characters, of the lookahead window used when
    /// the source has no native checkpoint support.
    ///
    /// The window grows as needed; this only avoids early reallocation.
    ///
    /// # Default
    ///
    /// `64`
    pub buffer_capacity: usize,

    /// How many characters the source may deliver past a
    /// [`mark`](crate::CharacterStream::mark) before the mark expires.
    ///
    /// Every character read from the source counts, including the ones a
    /// `peek` reads and puts back. Once a buffered source exceeds the limit,
    /// [`reset`](crate::CharacterStream::reset) fails with
    /// [`StreamError::InvalidCheckpoint`](crate::StreamError::InvalidCheckpoint).
    /// Sources with native checkpoints, such as
    /// [`StrSource`](crate::StrSource), ignore it.
    ///
    /// # Default
    ///
    /// `usize::MAX`, i.e. lookahead past a mark is unbounded.
    pub mark_read_limit: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: 64,
            mark_read_limit: usize::MAX,
        }
    }
}
