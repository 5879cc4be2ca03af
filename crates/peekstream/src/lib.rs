//! A character stream for hand-written lexers and parsers.
//!
//! [`CharacterStream`] wraps any [`CharSource`] and adds what a lexer needs
//! underneath it: lookahead of any length that never consumes input, a
//! single [`mark`](CharacterStream::mark)/[`reset`](CharacterStream::reset)
//! checkpoint, skipping by count or by [`Matcher`], and a [`Position`]
//! (offset, line, column) kept up to date one character at a time.
//!
//! ```rust
//! use peekstream::{CharacterStream, Match};
//!
//! let mut stream = CharacterStream::from_reader(&b"  hello\nworld"[..]).unwrap();
//! stream.skip_matching(Match::WhitespaceNotNewline).unwrap();
//! assert_eq!(stream.peek_string(5).unwrap(), "hello");
//!
//! let word: String = stream
//!     .chars()
//!     .map_while(|c| c.ok().filter(|c| *c != '\n'))
//!     .collect();
//! assert_eq!(word, "hello");
//! assert_eq!(stream.current_position().to_string(), "[8:1:0]");
//! ```

mod error;
mod matcher;
mod options;
mod position;
mod source;
mod stream;

#[cfg(test)]
mod tests;

pub use error::StreamError;
pub use matcher::{Match, Matcher};
pub use options::StreamOptions;
pub use position::Position;
pub use source::{CharSource, CheckpointBuffer, Checkpoint, IterSource, StrSource, Utf8Reader};
pub use stream::{CharacterStream, Chars};
