#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use peekstream::{CharacterStream, Match, StreamError, StreamOptions, Utf8Reader};

#[derive(Debug, Arbitrary)]
enum Op {
    Read,
    Peek,
    PeekN(u8),
    PeekAndMatch(String),
    Skip(u8),
    SkipWhitespace,
    SkipBlanks,
    Mark,
    Reset,
    AtEof,
    AtNewLine,
}

#[derive(Debug, Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    /// Largest chunk the reader hands out per `read` call.
    chunk: u8,
    buffer_capacity: u8,
    ops: Vec<Op>,
}

/// Hands out at most `chunk` bytes per call so multi-byte sequences get
/// split across reads.
struct Trickle<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reference behaviour: a char slice, an index and a saved index.
struct Model {
    chars: Vec<char>,
    idx: usize,
    mark: usize,
}

impl Model {
    fn ahead(&self, n: usize) -> &[char] {
        &self.chars[self.idx..(self.idx + n).min(self.chars.len())]
    }

    fn line_column(&self) -> (usize, usize) {
        self.chars[..self.idx]
            .iter()
            .fold((0, 0), |(line, col), &c| if c == '\n' { (line + 1, 0) } else { (line, col + 1) })
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.idx;
        while self.chars.get(self.idx).is_some_and(|&c| pred(c)) {
            self.idx += 1;
        }
        self.idx - start
    }
}

fn run(input: &Input) -> Result<(), StreamError> {
    let valid = std::str::from_utf8(&input.bytes);
    let reader = Trickle {
        data: &input.bytes,
        chunk: usize::from(input.chunk.max(1)),
    };
    let options = StreamOptions {
        buffer_capacity: usize::from(input.buffer_capacity),
        ..StreamOptions::default()
    };
    let mut stream = CharacterStream::with_options(Utf8Reader::new(reader), options)?;

    let Ok(text) = valid else {
        // Invalid input must surface as an error before the stream runs dry.
        let drained: Result<Vec<char>, StreamError> = stream.chars().collect();
        assert!(matches!(drained, Err(StreamError::InvalidUtf8 { .. })));
        return Ok(());
    };

    let mut model = Model {
        chars: text.chars().collect(),
        idx: 0,
        mark: 0,
    };

    for op in &input.ops {
        match op {
            Op::Read => {
                let expected = model.ahead(1).first().copied();
                assert_eq!(stream.read()?, expected);
                if expected.is_some() {
                    model.idx += 1;
                }
            }
            Op::Peek => assert_eq!(stream.peek()?, model.ahead(1).first().copied()),
            Op::PeekN(n) => {
                let n = usize::from(*n);
                assert_eq!(stream.peek_n(n)?, model.ahead(n));
            }
            Op::PeekAndMatch(s) => {
                let want: Vec<char> = s.chars().collect();
                assert_eq!(stream.peek_and_match(s)?, model.ahead(want.len()) == want.as_slice());
            }
            Op::Skip(n) => {
                stream.skip(usize::from(*n))?;
                model.idx = (model.idx + usize::from(*n)).min(model.chars.len());
            }
            Op::SkipWhitespace => {
                let skipped = stream.skip_matching(Match::Whitespace)?;
                assert_eq!(skipped, model.skip_while(char::is_whitespace));
            }
            Op::SkipBlanks => {
                let skipped = stream.skip_matching(Match::WhitespaceNotNewline)?;
                assert_eq!(skipped, model.skip_while(|c| c.is_whitespace() && c != '\n'));
            }
            Op::Mark => {
                stream.mark()?;
                model.mark = model.idx;
            }
            Op::Reset => {
                stream.reset()?;
                model.idx = model.mark;
            }
            Op::AtEof => assert_eq!(stream.is_at_eof()?, model.idx == model.chars.len()),
            Op::AtNewLine => assert_eq!(
                stream.is_at_new_line()?,
                matches!(model.ahead(2), ['\n', ..] | ['\r', '\n'])
            ),
        }

        let position = stream.current_position();
        assert_eq!(position.offset(), model.idx);
        assert_eq!((position.line(), position.column()), model.line_column());
    }

    stream.close()
}

fuzz_target!(|input: Input| {
    if let Err(err) = run(&input) {
        panic!("stream failed on valid input: {err}");
    }
});
