use alloc::{string::String, vec::Vec};

use crate::{
    error::{ReadError, WriteToError},
    partial::{Filled, Partial},
    reader::{BytesReader, RunesReader, StringReader, Whence},
    rune_reader::RuneReader,
    sink::Sink,
};

/// One of the three reader variants, chosen by the shape of the input.
///
/// Built with [`new_rune_reader`] or any of the `From` conversions. Inputs of
/// any other shape have no conversion and are rejected at compile time.
#[derive(Debug, Clone)]
pub enum AnyReader<'a> {
    /// Over a byte buffer.
    Bytes(BytesReader<'a>),
    /// Over a string.
    String(StringReader<'a>),
    /// Over pre-decoded codepoints.
    Runes(RunesReader<'a>),
}

/// Construct the reader variant matching `input`: byte buffers give
/// [`AnyReader::Bytes`], strings give [`AnyReader::String`] and codepoint
/// slices give [`AnyReader::Runes`].
///
/// ```rust
/// use runereader::{AnyReader, RuneReader, new_rune_reader};
///
/// let mut r = new_rune_reader("日本語");
/// assert!(matches!(r, AnyReader::String(_)));
/// assert_eq!(r.read_codepoint_at(3), Ok(('本', 3)));
///
/// let runes = ['日', '本', '語'];
/// let mut r = new_rune_reader(&runes[..]);
/// assert_eq!(r.read_codepoint_at(1), Ok(('本', 1)));
/// ```
pub fn new_rune_reader<'a>(input: impl Into<AnyReader<'a>>) -> AnyReader<'a> {
    input.into()
}

impl<'a> From<&'a [u8]> for AnyReader<'a> {
    fn from(data: &'a [u8]) -> Self {
        AnyReader::Bytes(BytesReader::new(data))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for AnyReader<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        AnyReader::Bytes(BytesReader::new(data))
    }
}

impl<'a> From<&'a Vec<u8>> for AnyReader<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        AnyReader::Bytes(BytesReader::new(data))
    }
}

impl<'a> From<&'a str> for AnyReader<'a> {
    fn from(data: &'a str) -> Self {
        AnyReader::String(StringReader::new(data))
    }
}

impl<'a> From<&'a String> for AnyReader<'a> {
    fn from(data: &'a String) -> Self {
        AnyReader::String(StringReader::new(data))
    }
}

impl<'a> From<&'a [char]> for AnyReader<'a> {
    fn from(data: &'a [char]) -> Self {
        AnyReader::Runes(RunesReader::new(data))
    }
}

impl<'a, const N: usize> From<&'a [char; N]> for AnyReader<'a> {
    fn from(data: &'a [char; N]) -> Self {
        AnyReader::Runes(RunesReader::new(data))
    }
}

impl<'a> From<&'a Vec<char>> for AnyReader<'a> {
    fn from(data: &'a Vec<char>) -> Self {
        AnyReader::Runes(RunesReader::new(data))
    }
}

impl<'a> From<BytesReader<'a>> for AnyReader<'a> {
    fn from(reader: BytesReader<'a>) -> Self {
        AnyReader::Bytes(reader)
    }
}

impl<'a> From<StringReader<'a>> for AnyReader<'a> {
    fn from(reader: StringReader<'a>) -> Self {
        AnyReader::String(reader)
    }
}

impl<'a> From<RunesReader<'a>> for AnyReader<'a> {
    fn from(reader: RunesReader<'a>) -> Self {
        AnyReader::Runes(reader)
    }
}

impl AnyReader<'_> {
    /// Name of the wrapped variant, as used in error messages.
    #[must_use]
    pub const fn reader_name(&self) -> &'static str {
        match self {
            AnyReader::Bytes(_) => "BytesReader",
            AnyReader::String(_) => "StringReader",
            AnyReader::Runes(_) => "RunesReader",
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $r:ident => $body:expr) => {
        match $self {
            AnyReader::Bytes($r) => $body,
            AnyReader::String($r) => $body,
            AnyReader::Runes($r) => $body,
        }
    };
}

impl RuneReader for AnyReader<'_> {
    fn remaining_length(&self) -> usize {
        dispatch!(self, r => r.remaining_length())
    }

    fn total_size(&self) -> usize {
        dispatch!(self, r => r.total_size())
    }

    fn position(&self) -> u64 {
        dispatch!(self, r => r.position())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        dispatch!(self, r => r.read(buf))
    }

    fn read_at(&self, buf: &mut [u8], offset: i64) -> Result<Filled, ReadError> {
        dispatch!(self, r => r.read_at(buf, offset))
    }

    fn read_byte(&mut self) -> Result<u8, ReadError> {
        dispatch!(self, r => r.read_byte())
    }

    fn unread_byte(&mut self) -> Result<(), ReadError> {
        dispatch!(self, r => r.unread_byte())
    }

    fn read_codepoint(&mut self) -> Result<(char, usize), ReadError> {
        dispatch!(self, r => r.read_codepoint())
    }

    fn unread_codepoint(&mut self) -> Result<(), ReadError> {
        dispatch!(self, r => r.unread_codepoint())
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, ReadError> {
        dispatch!(self, r => r.seek(offset, whence))
    }

    fn write_to<K: Sink + ?Sized>(
        &mut self,
        sink: &mut K,
    ) -> Result<usize, WriteToError<K::Error>> {
        dispatch!(self, r => r.write_to(sink))
    }

    fn read_codepoint_at(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        dispatch!(self, r => r.read_codepoint_at(index))
    }

    fn read_prev_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        dispatch!(self, r => r.read_prev_codepoint_from(index))
    }

    fn read_next_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        dispatch!(self, r => r.read_next_codepoint_from(index))
    }

    fn read_codepoint_slice(
        &mut self,
        index: i64,
        count: i64,
    ) -> Result<Partial<Vec<char>>, ReadError> {
        dispatch!(self, r => r.read_codepoint_slice(index, count))
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn dispatches_on_input_shape() {
        let bytes = b"bytes".to_vec();
        let string = "string".to_string();
        let runes = vec!['r', 'u', 'n', 'e', 's'];

        assert!(matches!(new_rune_reader(&bytes), AnyReader::Bytes(_)));
        assert!(matches!(new_rune_reader(&bytes[..]), AnyReader::Bytes(_)));
        assert!(matches!(new_rune_reader(b"lit"), AnyReader::Bytes(_)));
        assert!(matches!(new_rune_reader(&string), AnyReader::String(_)));
        assert!(matches!(new_rune_reader("lit"), AnyReader::String(_)));
        assert!(matches!(new_rune_reader(&runes), AnyReader::Runes(_)));
        assert!(matches!(new_rune_reader(&['x']), AnyReader::Runes(_)));
    }

    #[test]
    fn variants_share_codepoint_view() {
        let text = "日本語";
        let runes: Vec<char> = text.chars().collect();
        let mut readers = [
            new_rune_reader(text.as_bytes()),
            new_rune_reader(text),
            new_rune_reader(&runes),
        ];
        for r in &mut readers {
            let all = r.read_codepoint_slice(0, 3).unwrap();
            assert_eq!(all.value, runes, "{}", r.reader_name());
            assert!(!all.end_of_data);
        }
        assert_eq!(readers[0].total_size(), 9);
        assert_eq!(readers[1].total_size(), 9);
        assert_eq!(readers[2].total_size(), 3);
    }
}
