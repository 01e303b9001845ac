#![no_main]
//! Drives a byte reader, a string reader and a char-slice reader over the same
//! text with one operation sequence and checks they stay in agreement.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runereader::{BytesReader, ErrorKind, ReadError, RunesReader, StringReader};

#[derive(Arbitrary, Debug)]
enum Step {
    /// Index into the codepoint boundaries, wrapped.
    At(u16),
    Prev(u16),
    Next(u16),
    Slice(u16, i8),
    ReadCodepoint,
    UnreadCodepoint,
    /// Raw byte offset; only the encoded readers take it.
    AtRawByte(u16),
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    steps: Vec<Step>,
}

fn same<T: PartialEq + std::fmt::Debug>(a: &Result<T, ReadError>, b: &Result<T, ReadError>) {
    match (a, b) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.kind(), b.kind()),
        _ => panic!("diverged: {a:?} vs {b:?}"),
    }
}

fuzz_target!(|input: Input| {
    let text = input.text.as_str();
    let runes: Vec<char> = text.chars().collect();
    // (byte offset, codepoint ordinal) of every boundary, plus the end.
    let bounds: Vec<(i64, i64)> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain([text.len()])
        .enumerate()
        .map(|(n, b)| (b as i64, n as i64))
        .collect();
    let bound = |k: u16| bounds[usize::from(k) % bounds.len()];

    let mut bytes = BytesReader::new(text.as_bytes());
    let mut string = StringReader::new(text);
    let mut chars = RunesReader::new(&runes);

    for step in input.steps {
        match step {
            Step::At(k) => {
                let (b, n) = bound(k);
                let e = bytes.read_codepoint_at(b);
                same(&e, &string.read_codepoint_at(b));
                same(&e.map(|(c, _)| c), &chars.read_codepoint_at(n).map(|(c, _)| c));
            }
            Step::Prev(k) => {
                let (b, n) = bound(k);
                let e = bytes.read_prev_codepoint_from(b);
                same(&e, &string.read_prev_codepoint_from(b));
                same(
                    &e.map(|(c, _)| c),
                    &chars.read_prev_codepoint_from(n).map(|(c, _)| c),
                );
            }
            Step::Next(k) => {
                let (b, n) = bound(k);
                let e = bytes.read_next_codepoint_from(b);
                same(&e, &string.read_next_codepoint_from(b));
                same(
                    &e.map(|(c, _)| c),
                    &chars.read_next_codepoint_from(n).map(|(c, _)| c),
                );
            }
            Step::Slice(k, count) => {
                let (b, n) = bound(k);
                let count = i64::from(count);
                let e = bytes.read_codepoint_slice(b, count);
                same(&e, &string.read_codepoint_slice(b, count));
                let r = chars.read_codepoint_slice(n, count);
                same(
                    &e.map(|p| (p.value, p.end_of_data)),
                    &r.map(|p| (p.value, p.end_of_data)),
                );
                let s = string.read_string(b, count);
                if let Ok(s) = s {
                    let raw = bytes.read_byte_slice(b, count).unwrap();
                    assert_eq!(s.value.as_bytes(), raw.value);
                    assert_eq!(s.size, raw.value.len());
                }
            }
            Step::ReadCodepoint => {
                let e = bytes.read_codepoint();
                same(&e, &string.read_codepoint());
                same(&e.map(|(c, _)| c), &chars.read_codepoint().map(|(c, _)| c));
            }
            Step::UnreadCodepoint => {
                let e = bytes.unread_codepoint();
                same(&e, &string.unread_codepoint());
                let r = chars.unread_codepoint();
                assert_eq!(e.is_ok(), r.is_ok(), "{e:?} vs {r:?}");
            }
            Step::AtRawByte(off) => {
                let at = i64::from(off);
                let e = bytes.read_codepoint_at(at);
                same(&e, &string.read_codepoint_at(at));
                if let Ok((_, size)) = e {
                    assert!((1..=4).contains(&size));
                } else {
                    assert_eq!(e.unwrap_err().kind(), ErrorKind::EndOfData);
                }
                // realign the char reader with the byte readers' cursor
                let pos = bytes.position();
                let n = bounds
                    .iter()
                    .find(|&&(b, _)| b as u64 >= pos)
                    .map_or(runes.len() as i64, |&(_, n)| n);
                chars.seek(n, runereader::Whence::Start).unwrap();
                bytes.seek(bounds_byte(&bounds, n), runereader::Whence::Start).unwrap();
                string.seek(bounds_byte(&bounds, n), runereader::Whence::Start).unwrap();
            }
        }
    }
});

fn bounds_byte(bounds: &[(i64, i64)], n: i64) -> i64 {
    bounds.iter().find(|&&(_, m)| m == n).map_or(0, |&(b, _)| b)
}
