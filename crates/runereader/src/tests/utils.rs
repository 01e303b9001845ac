//! Helpers for running one scenario against every reader variant.

use alloc::vec::Vec;

use crate::{AnyReader, new_rune_reader};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Bytes,
    String,
    Runes,
}

pub const SHAPES: [Shape; 3] = [Shape::Bytes, Shape::String, Shape::Runes];

/// Build the `shape` reader over `text` and hand it to `f`.
pub fn with_reader<T>(shape: Shape, text: &str, f: impl FnOnce(&mut AnyReader<'_>) -> T) -> T {
    let runes: Vec<char> = text.chars().collect();
    let mut reader = match shape {
        Shape::Bytes => new_rune_reader(text.as_bytes()),
        Shape::String => new_rune_reader(text),
        Shape::Runes => new_rune_reader(&runes),
    };
    f(&mut reader)
}

/// Native index and encoded size of every codepoint of `text` for `shape`.
pub fn boundaries(shape: Shape, text: &str) -> Vec<(i64, char, usize)> {
    text.char_indices()
        .enumerate()
        .map(|(n, (byte, ch))| match shape {
            Shape::Runes => (n as i64, ch, 1),
            Shape::Bytes | Shape::String => (byte as i64, ch, ch.len_utf8()),
        })
        .collect()
}
