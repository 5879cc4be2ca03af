use thiserror::Error;

/// Errors surfaced by a [`CharacterStream`](crate::CharacterStream) or one of
/// its [`CharSource`](crate::CharSource)s.
///
/// Reaching the end of the input is not an error: reads and peeks report it
/// as `None`.
#[derive(Error, Debug)]
pub enum StreamError {
    /// The underlying reader failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The byte source contained a malformed or truncated UTF-8 sequence.
    #[error("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the sequence's lead byte.
        offset: usize,
    },
    /// A checkpoint was requested from a source that cannot rewind.
    #[error("source does not support checkpoints")]
    CheckpointUnsupported,
    /// A rewind targeted a checkpoint the source no longer holds.
    #[error("checkpoint at {cursor} is no longer valid")]
    InvalidCheckpoint {
        /// Source cursor recorded by the checkpoint.
        cursor: usize,
    },
    /// The stream was used after [`close`](crate::CharacterStream::close).
    #[error("stream is closed")]
    Closed,
}
