use std::collections::VecDeque;

use tracing::debug;

use super::{CharSource, Checkpoint};
use crate::StreamError;

/// Adds checkpoints to a source that has none.
///
/// Characters pulled from the inner source are kept in a window for as long
/// as some checkpoint might rewind to them. The window covers absolute
/// character offsets `base..base + window.len()`; `cursor` is the absolute
/// offset of the next character to hand out.
///
/// Each checkpoint is a hold on the window. A hold lapses once the cursor
/// has moved more than its read limit past it, and the window is trimmed up
/// to the oldest hold still alive.
#[derive(Debug)]
pub struct CheckpointBuffer<S> {
    inner: S,
    window: VecDeque<char>,
    base: usize,
    cursor: usize,
    holds: Vec<Checkpoint>,
    exhausted: bool,
}

impl<S: CharSource> CheckpointBuffer<S> {
    /// Wraps `inner` with a small default window.
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, 64)
    }

    /// Wraps `inner`, reserving room for `capacity` characters up front.
    pub fn with_capacity(inner: S, capacity: usize) -> Self {
        Self {
            inner,
            window: VecDeque::with_capacity(capacity),
            base: 0,
            cursor: 0,
            holds: Vec::new(),
            exhausted: false,
        }
    }

    /// Characters currently retained for rewinding or replay.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    /// Drops holds the cursor has outrun, then discards window characters no
    /// live hold can reach.
    ///
    /// Runs on every read and is linear in the number of live holds. A
    /// [`CharacterStream`](crate::CharacterStream) keeps at most two.
    fn settle(&mut self) {
        let cursor = self.cursor;
        self.holds.retain(|hold| {
            // Holds ahead of the cursor (after a rewind past them) stay alive.
            let alive = cursor.saturating_sub(hold.cursor()) <= hold.read_limit();
            if !alive {
                debug!(
                    checkpoint = hold.cursor(),
                    read_limit = hold.read_limit(),
                    cursor,
                    "checkpoint expired"
                );
            }
            alive
        });

        let keep_from = self
            .holds
            .iter()
            .map(Checkpoint::cursor)
            .fold(cursor, usize::min);
        let stale = keep_from - self.base;
        if stale > 0 {
            self.window.drain(..stale);
            self.base = keep_from;
        }

        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            self.cursor - self.base <= self.window.len(),
            "cursor {} left the window {}..{}",
            self.cursor,
            self.base,
            self.base + self.window.len()
        );
    }
}

impl<S: CharSource> CharSource for CheckpointBuffer<S> {
    fn read_char(&mut self) -> Result<Option<char>, StreamError> {
        let ch = if let Some(&c) = self.window.get(self.cursor - self.base) {
            c
        } else {
            if self.exhausted {
                return Ok(None);
            }
            let Some(c) = self.inner.read_char()? else {
                self.exhausted = true;
                return Ok(None);
            };
            self.window.push_back(c);
            c
        };
        self.cursor += 1;
        self.settle();
        Ok(Some(ch))
    }

    fn supports_checkpoint(&self) -> bool {
        true
    }

    fn checkpoint(&mut self, read_limit: usize) -> Result<Checkpoint, StreamError> {
        let checkpoint = Checkpoint::new(self.cursor, read_limit);
        self.holds.push(checkpoint);
        Ok(checkpoint)
    }

    fn rewind(&mut self, checkpoint: &Checkpoint) -> Result<(), StreamError> {
        if !self.holds.contains(checkpoint) {
            return Err(StreamError::InvalidCheckpoint {
                cursor: checkpoint.cursor(),
            });
        }
        self.cursor = checkpoint.cursor();
        Ok(())
    }

    fn release(&mut self, checkpoint: Checkpoint) {
        if let Some(idx) = self.holds.iter().position(|hold| *hold == checkpoint) {
            self.holds.swap_remove(idx);
            self.settle();
        }
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.window.clear();
        self.holds.clear();
        self.inner.close()
    }
}
