/// A predicate over a single character.
///
/// Implemented for [`Match`] and for any `Fn(char) -> bool`, so
/// [`CharacterStream::skip_matching`](crate::CharacterStream::skip_matching)
/// accepts either:
///
/// ```rust
/// use peekstream::{CharacterStream, Match};
///
/// let mut stream = CharacterStream::from_text("  42;").unwrap();
/// assert_eq!(stream.skip_matching(Match::Whitespace).unwrap(), 2);
/// assert_eq!(stream.skip_matching(|c: char| c.is_ascii_digit()).unwrap(), 2);
/// assert_eq!(stream.peek().unwrap(), Some(';'));
/// ```
pub trait Matcher {
    /// Whether `ch` satisfies the predicate.
    fn matches(&self, ch: char) -> bool;
}

/// The built-in predicates, plus an escape hatch for plain function pointers.
#[derive(Debug, Clone, Copy)]
pub enum Match {
    /// Any character with the Unicode `White_Space` property.
    Whitespace,
    /// Whitespace other than `'\n'`. A lone `'\r'` still matches.
    WhitespaceNotNewline,
    /// Delegates to the wrapped function.
    Custom(fn(char) -> bool),
}

impl Matcher for Match {
    #[inline]
    fn matches(&self, ch: char) -> bool {
        match self {
            Match::Whitespace => ch.is_whitespace(),
            Match::WhitespaceNotNewline => ch.is_whitespace() && ch != '\n',
            Match::Custom(f) => f(ch),
        }
    }
}

impl<F> Matcher for F
where
    F: Fn(char) -> bool,
{
    #[inline]
    fn matches(&self, ch: char) -> bool {
        self(ch)
    }
}
