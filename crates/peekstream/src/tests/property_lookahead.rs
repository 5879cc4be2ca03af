use quickcheck::QuickCheck;

use super::model::test_count;
use crate::{CharSource, CharacterStream, IterSource, StrSource};

fn check_peek<S: CharSource>(
    mut stream: CharacterStream<S>,
    text: &str,
    skip: usize,
    count: usize,
) -> bool {
    stream.skip(skip).unwrap();
    let before = (stream.current_position(), stream.marked_position());

    let expected: Vec<char> = text.chars().skip(skip).take(count).collect();
    let stable = (0..3).all(|_| stream.peek_n(count).unwrap() == expected);

    let after = (stream.current_position(), stream.marked_position());
    // Same offsets and the same line/column layout.
    let unchanged = before == after && before.0.to_string() == after.0.to_string();

    stable && unchanged && stream.peek_and_match(&expected.iter().collect::<String>()).unwrap()
}

/// Property: `peek_n` is repeatable, truncates at end of input without
/// padding, and moves neither position.
#[test]
fn peek_is_non_destructive_and_truncated() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, skip: u8, count: u8) -> bool {
        let (skip, count) = (usize::from(skip % 32), usize::from(count));
        check_peek(CharacterStream::from_text(&text).unwrap(), &text, skip, count)
            && check_peek(
                CharacterStream::new(IterSource::new(text.chars())).unwrap(),
                &text,
                skip,
                count,
            )
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, u8, u8) -> bool);
}

/// Property: the new-line check agrees with a direct look at the text.
#[test]
fn new_line_detection_matches_text() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let expected = text.starts_with('\n') || text.starts_with("\r\n");
        let mut native = CharacterStream::new(StrSource::new(&text)).unwrap();
        let mut buffered = CharacterStream::new(IterSource::new(text.chars())).unwrap();
        native.is_at_new_line().unwrap() == expected
            && buffered.is_at_new_line().unwrap() == expected
            && native.current_position().offset() == 0
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}
