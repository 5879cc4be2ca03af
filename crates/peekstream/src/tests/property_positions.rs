use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::model::{Model, Op, agrees_with_model, test_count};
use crate::{CharacterStream, IterSource};

/// Property: reading a whole input one character at a time leaves the
/// position at the input's length, on its last line, at the length of that
/// line; reading further changes nothing.
#[test]
fn position_matches_consumed_text() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let mut stream = CharacterStream::new(IterSource::new(text.chars())).unwrap();
        while stream.read().unwrap().is_some() {}

        let mut model = Model::new(&text);
        model.idx = model.chars.len();
        let (line, column) = model.line_column();
        let end = stream.current_position();

        let tail_stable = (0..3).all(|_| {
            stream.read().unwrap().is_none() && stream.current_position() == end
        });

        tail_stable
            && end.offset() == text.chars().count()
            && end.line() == line
            && end.column() == column
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

/// Property: any interleaving of reads, peeks, skips, marks and resets keeps
/// both stream flavours in lockstep with the reference model.
#[test]
fn operation_sequences_match_model() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, ops: Vec<Op>) -> bool {
        agrees_with_model(&text, &ops)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String, Vec<Op>) -> bool);
}

#[quickcheck]
fn newline_heavy_sequences_match_model(lines: Vec<u8>, ops: Vec<Op>) -> bool {
    // Short lines separated by a mix of "\n" and "\r\n".
    let text: String = lines
        .iter()
        .map(|n| {
            let body = "x".repeat(usize::from(n % 4));
            if n % 2 == 0 { body + "\n" } else { body + "\r\n" }
        })
        .collect();
    agrees_with_model(&text, &ops)
}
