use quickcheck::QuickCheck;

use super::model::test_count;
use crate::{CharSource, CharacterStream, IterSource, StrSource};

fn round_trip<S: CharSource>(
    mut stream: CharacterStream<S>,
    before: usize,
    first: usize,
    second: Option<usize>,
) -> bool {
    stream.skip(before).unwrap();
    stream.mark().unwrap();
    let mut marked = stream.current_position();
    let mut tail: Vec<Option<char>> = Vec::new();

    if let Some(extra) = second {
        // Re-marking further on replaces the first mark.
        stream.skip(extra).unwrap();
        stream.mark().unwrap();
        marked = stream.current_position();
    }

    for _ in 0..first {
        tail.push(stream.read().unwrap());
    }
    stream.reset().unwrap();

    let restored = stream.current_position();
    let replay: Vec<Option<char>> = (0..first).map(|_| stream.read().unwrap()).collect();

    restored == marked
        && restored.to_string() == marked.to_string()
        && stream.marked_position() == marked
        && replay == tail
}

/// Property: after `mark`, any amount of reading followed by `reset` restores
/// the marked position and replays exactly the same characters. A second
/// `mark` wins over the first.
#[test]
fn reset_replays_from_latest_mark() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, before: u8, first: u8, second: Option<u8>) -> bool {
        let before = usize::from(before % 24);
        let first = usize::from(first);
        let second = second.map(|s| usize::from(s % 24));
        round_trip(CharacterStream::from_text(&text).unwrap(), before, first, second)
            && round_trip(
                CharacterStream::new(IterSource::new(text.chars())).unwrap(),
                before,
                first,
                second,
            )
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, u8, u8, Option<u8>) -> bool);
}

/// Property: without any `mark`, `reset` goes back to the very start.
#[test]
fn reset_without_mark_returns_to_start() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, consumed: u8) -> bool {
        let mut stream = CharacterStream::new(StrSource::new(&text)).unwrap();
        let mut buffered = CharacterStream::new(IterSource::new(text.chars())).unwrap();
        stream.skip(consumed.into()).unwrap();
        buffered.skip(consumed.into()).unwrap();
        stream.reset().unwrap();
        buffered.reset().unwrap();

        let all: String = stream.chars().map(Result::unwrap).collect();
        let all_buffered: String = buffered.chars().map(Result::unwrap).collect();
        all == text && all_buffered == text
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, u8) -> bool);
}
