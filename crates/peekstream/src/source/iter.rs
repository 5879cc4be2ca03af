use core::iter::Fuse;

use super::CharSource;
use crate::StreamError;

/// A source over any character iterator. Has no checkpoints of its own.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: Fuse<I>,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = char>,
{
    /// Wraps `iter`. The iterator is fused, so it is never polled again after
    /// it first returns `None`.
    pub fn new(iter: I) -> Self {
        Self { iter: iter.fuse() }
    }
}

impl<I> CharSource for IterSource<I>
where
    I: Iterator<Item = char>,
{
    #[inline]
    fn read_char(&mut self) -> Result<Option<char>, StreamError> {
        Ok(self.iter.next())
    }
}
