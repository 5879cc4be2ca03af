use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// A location in a character stream.
///
/// `offset` counts every character consumed since the start of the stream.
/// `line` is zero based and advances on each `'\n'`; `column` is the zero
/// based index within the current line and drops back to 0 right after a
/// `'\n'`.
///
/// Equality, ordering and hashing look at `offset` alone: two positions are
/// the same when the same number of characters has been consumed to reach
/// them. Line and column are carried along for diagnostics but never take
/// part in comparisons.
///
/// ```rust
/// use peekstream::CharacterStream;
///
/// let mut stream = CharacterStream::from_text("ab\ncd").unwrap();
/// stream.skip(4).unwrap();
/// let pos = stream.current_position();
/// assert_eq!((pos.offset(), pos.line(), pos.column()), (4, 1, 1));
/// assert_eq!(pos.to_string(), "[4:1:1]");
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    offset: usize,
    line: usize,
    column: usize,
}

impl Position {
    /// The position before any character has been consumed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    /// Characters consumed since the start of the stream.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Zero based line number.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Zero based column within the current line.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn advance_in_line(&mut self) {
        self.column += 1;
        self.offset += 1;
    }

    pub(crate) fn advance_to_new_line(&mut self) {
        self.line += 1;
        self.column = 0;
        self.offset += 1;
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.offset, self.line, self.column)
    }
}
