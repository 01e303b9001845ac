//! Backing storage for [`Reader`](crate::Reader).
//!
//! A [`Storage`] is the only place where the three reader variants differ: it
//! fixes the index space (bytes for `[u8]` and `str`, codepoints for
//! `[char]`) and knows how to decode one codepoint forward or backward from a
//! unit offset. Everything else in the crate is written once against this
//! trait.
//!
//! Encoded storage decodes with [`bstr`], so malformed UTF-8 yields
//! `U+FFFD` sized as the maximal invalid prefix (one to three bytes) instead of
//! an error. Offsets are not required to sit on a codepoint boundary; decoding
//! from the middle of a sequence simply produces replacement characters.

use alloc::{borrow::Cow, vec::Vec};

use crate::error::{InvalidArgument, InvalidState};

/// Per-variant storage operations.
///
/// "Unit" means one element of the native index space: a byte for encoded
/// storage, a `char` for pre-decoded storage. Callers guarantee the offset
/// preconditions documented on each method.
pub trait Storage {
    /// Reader name used in error messages.
    const READER: &'static str;

    /// An empty value, used by `Default`.
    fn empty() -> &'static Self;

    /// Total size in units.
    fn units(&self) -> usize;

    /// Decode the codepoint starting at unit `at`, returning it with its
    /// encoded size in units. Requires `at < self.units()`.
    fn decode_at(&self, at: usize) -> (char, usize);

    /// Decode the codepoint whose last unit is `end - 1`. Requires
    /// `0 < end <= self.units()`.
    fn decode_before(&self, end: usize) -> (char, usize);

    /// Copy the bytes of the units starting at `from` into `buf`, returning
    /// `(units consumed, bytes written)`. Requires `from < self.units()`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::BufferTooSmall`] when `buf` is non-empty but cannot
    /// hold a single whole unit.
    fn copy_units(&self, from: usize, buf: &mut [u8]) -> Result<(usize, usize), InvalidArgument>;

    /// The unit at `at` as a raw byte. Requires `at < self.units()`.
    ///
    /// # Errors
    ///
    /// [`InvalidState::NotAByte`] when the unit is a codepoint wider than a
    /// byte.
    fn byte_at(&self, at: usize) -> Result<u8, InvalidState>;

    /// The encoded bytes of every unit from `from` to the end. Requires
    /// `from <= self.units()`.
    fn encoded_tail(&self, from: usize) -> Cow<'_, [u8]>;

    /// How many whole units starting at `from` are covered by the first
    /// `bytes` bytes of [`Storage::encoded_tail`].
    fn units_in(&self, from: usize, bytes: usize) -> usize;
}

/// Storage whose units are the raw UTF-8 bytes, which makes byte-range
/// slicing meaningful.
pub trait EncodedStorage: Storage {
    /// The raw bytes.
    fn as_encoded(&self) -> &[u8];
}

#[inline]
fn decode_utf8_at(bytes: &[u8], at: usize) -> (char, usize) {
    let b = bytes[at];
    if b.is_ascii() {
        return (char::from(b), 1);
    }
    let (ch, len) = bstr::decode_utf8(&bytes[at..]);
    debug_assert!((1..=4).contains(&len), "decoded {len} bytes at {at}");
    (ch.unwrap_or(char::REPLACEMENT_CHARACTER), len)
}

#[inline]
fn decode_utf8_before(bytes: &[u8], end: usize) -> (char, usize) {
    let b = bytes[end - 1];
    if b.is_ascii() {
        return (char::from(b), 1);
    }
    let (ch, len) = bstr::decode_last_utf8(&bytes[..end]);
    debug_assert!((1..=4).contains(&len), "decoded {len} bytes before {end}");
    (ch.unwrap_or(char::REPLACEMENT_CHARACTER), len)
}

fn copy_bytes(bytes: &[u8], from: usize, buf: &mut [u8]) -> (usize, usize) {
    let src = &bytes[from..];
    let n = src.len().min(buf.len());
    buf[..n].copy_from_slice(&src[..n]);
    (n, n)
}

impl Storage for [u8] {
    const READER: &'static str = "BytesReader";

    fn empty() -> &'static Self {
        &[]
    }

    #[inline]
    fn units(&self) -> usize {
        self.len()
    }

    #[inline]
    fn decode_at(&self, at: usize) -> (char, usize) {
        decode_utf8_at(self, at)
    }

    #[inline]
    fn decode_before(&self, end: usize) -> (char, usize) {
        decode_utf8_before(self, end)
    }

    fn copy_units(&self, from: usize, buf: &mut [u8]) -> Result<(usize, usize), InvalidArgument> {
        Ok(copy_bytes(self, from, buf))
    }

    fn byte_at(&self, at: usize) -> Result<u8, InvalidState> {
        Ok(self[at])
    }

    fn encoded_tail(&self, from: usize) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self[from..])
    }

    fn units_in(&self, _from: usize, bytes: usize) -> usize {
        bytes
    }
}

impl EncodedStorage for [u8] {
    fn as_encoded(&self) -> &[u8] {
        self
    }
}

impl Storage for str {
    const READER: &'static str = "StringReader";

    fn empty() -> &'static Self {
        ""
    }

    #[inline]
    fn units(&self) -> usize {
        self.len()
    }

    // Offsets are byte offsets and may fall inside a sequence, so decode from
    // the bytes rather than slicing the `str`.
    #[inline]
    fn decode_at(&self, at: usize) -> (char, usize) {
        decode_utf8_at(self.as_bytes(), at)
    }

    #[inline]
    fn decode_before(&self, end: usize) -> (char, usize) {
        decode_utf8_before(self.as_bytes(), end)
    }

    fn copy_units(&self, from: usize, buf: &mut [u8]) -> Result<(usize, usize), InvalidArgument> {
        Ok(copy_bytes(self.as_bytes(), from, buf))
    }

    fn byte_at(&self, at: usize) -> Result<u8, InvalidState> {
        Ok(self.as_bytes()[at])
    }

    fn encoded_tail(&self, from: usize) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.as_bytes()[from..])
    }

    fn units_in(&self, _from: usize, bytes: usize) -> usize {
        bytes
    }
}

impl EncodedStorage for str {
    fn as_encoded(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Storage for [char] {
    const READER: &'static str = "RunesReader";

    fn empty() -> &'static Self {
        &[]
    }

    #[inline]
    fn units(&self) -> usize {
        self.len()
    }

    #[inline]
    fn decode_at(&self, at: usize) -> (char, usize) {
        (self[at], 1)
    }

    #[inline]
    fn decode_before(&self, end: usize) -> (char, usize) {
        (self[end - 1], 1)
    }

    // Only whole codepoints are copied; a codepoint is never split across two
    // reads.
    fn copy_units(&self, from: usize, buf: &mut [u8]) -> Result<(usize, usize), InvalidArgument> {
        let mut units = 0;
        let mut written = 0;
        for ch in &self[from..] {
            let len = ch.len_utf8();
            if written + len > buf.len() {
                break;
            }
            ch.encode_utf8(&mut buf[written..]);
            written += len;
            units += 1;
        }
        if units == 0 && !buf.is_empty() {
            return Err(InvalidArgument::BufferTooSmall);
        }
        Ok((units, written))
    }

    fn byte_at(&self, at: usize) -> Result<u8, InvalidState> {
        u8::try_from(u32::from(self[at]))
            .ok()
            .filter(u8::is_ascii)
            .ok_or(InvalidState::NotAByte)
    }

    fn encoded_tail(&self, from: usize) -> Cow<'_, [u8]> {
        let tail = &self[from..];
        let mut out = Vec::with_capacity(tail.iter().map(|ch| ch.len_utf8()).sum());
        let mut tmp = [0u8; 4];
        for ch in tail {
            out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
        }
        Cow::Owned(out)
    }

    fn units_in(&self, from: usize, bytes: usize) -> usize {
        let mut covered = 0;
        self[from..]
            .iter()
            .take_while(|ch| {
                covered += ch.len_utf8();
                covered <= bytes
            })
            .count()
    }
}
