use alloc::vec::Vec;

use crate::{
    error::{ReadError, WriteToError},
    partial::{Filled, Partial},
    reader::{Reader, Whence},
    sink::Sink,
    storage::Storage,
};

/// The capability set shared by every reader variant.
///
/// Positions and sizes are in the variant's native units: bytes for byte and
/// string storage, codepoints for `[char]` storage. Encoded sizes returned
/// with a codepoint are in the same units.
pub trait RuneReader {
    /// Units not yet consumed; zero at or past the end.
    fn remaining_length(&self) -> usize;

    /// Size of the backing storage in units.
    fn total_size(&self) -> usize;

    /// The cursor, in units. May exceed [`RuneReader::total_size`].
    fn position(&self) -> u64;

    /// Sequential read of raw bytes from the cursor.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] at or past the end.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError>;

    /// Positional read that leaves the reader untouched.
    ///
    /// # Errors
    ///
    /// A negative offset is an argument error; an offset at or past the end
    /// is [`ReadError::EndOfData`].
    fn read_at(&self, buf: &mut [u8], offset: i64) -> Result<Filled, ReadError>;

    /// Read one raw byte.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] at or past the end.
    fn read_byte(&mut self) -> Result<u8, ReadError>;

    /// Step back one unit.
    ///
    /// # Errors
    ///
    /// Refused at the start of the storage.
    fn unread_byte(&mut self) -> Result<(), ReadError>;

    /// Decode one codepoint at the cursor.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] at or past the end.
    fn read_codepoint(&mut self) -> Result<(char, usize), ReadError>;

    /// Undo the last forward codepoint decode.
    ///
    /// # Errors
    ///
    /// Refused at the start of the storage or with nothing to undo.
    fn unread_codepoint(&mut self) -> Result<(), ReadError>;

    /// Move the cursor.
    ///
    /// # Errors
    ///
    /// Refused when the target would be negative or overflow.
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, ReadError>;

    /// Drain the remaining bytes into `sink`.
    ///
    /// # Errors
    ///
    /// Short writes and sink failures, with the transferred count.
    fn write_to<K: Sink + ?Sized>(&mut self, sink: &mut K)
    -> Result<usize, WriteToError<K::Error>>;

    /// Decode the codepoint at an absolute index.
    ///
    /// # Errors
    ///
    /// Negative index, or [`ReadError::EndOfData`] at or past the end.
    fn read_codepoint_at(&mut self, index: i64) -> Result<(char, usize), ReadError>;

    /// Decode the codepoint ending just before `index`.
    ///
    /// # Errors
    ///
    /// Zero or negative index, or [`ReadError::EndOfData`] at or past the end.
    fn read_prev_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError>;

    /// Decode the codepoint following the one at `index`.
    ///
    /// # Errors
    ///
    /// Negative index, or [`ReadError::EndOfData`] when nothing follows.
    fn read_next_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError>;

    /// Decode up to `count` codepoints starting at `index`.
    ///
    /// # Errors
    ///
    /// Negative index, non-positive count, or [`ReadError::EndOfData`] when
    /// `index` is at or past the end.
    fn read_codepoint_slice(
        &mut self,
        index: i64,
        count: i64,
    ) -> Result<Partial<Vec<char>>, ReadError>;
}

impl<S: Storage + ?Sized> RuneReader for Reader<'_, S> {
    #[inline]
    fn remaining_length(&self) -> usize {
        Reader::remaining_length(self)
    }

    #[inline]
    fn total_size(&self) -> usize {
        Reader::total_size(self)
    }

    #[inline]
    fn position(&self) -> u64 {
        Reader::position(self)
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        Reader::read(self, buf)
    }

    #[inline]
    fn read_at(&self, buf: &mut [u8], offset: i64) -> Result<Filled, ReadError> {
        Reader::read_at(self, buf, offset)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, ReadError> {
        Reader::read_byte(self)
    }

    #[inline]
    fn unread_byte(&mut self) -> Result<(), ReadError> {
        Reader::unread_byte(self)
    }

    #[inline]
    fn read_codepoint(&mut self) -> Result<(char, usize), ReadError> {
        Reader::read_codepoint(self)
    }

    #[inline]
    fn unread_codepoint(&mut self) -> Result<(), ReadError> {
        Reader::unread_codepoint(self)
    }

    #[inline]
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, ReadError> {
        Reader::seek(self, offset, whence)
    }

    #[inline]
    fn write_to<K: Sink + ?Sized>(
        &mut self,
        sink: &mut K,
    ) -> Result<usize, WriteToError<K::Error>> {
        Reader::write_to(self, sink)
    }

    #[inline]
    fn read_codepoint_at(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        Reader::read_codepoint_at(self, index)
    }

    #[inline]
    fn read_prev_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        Reader::read_prev_codepoint_from(self, index)
    }

    #[inline]
    fn read_next_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        Reader::read_next_codepoint_from(self, index)
    }

    #[inline]
    fn read_codepoint_slice(
        &mut self,
        index: i64,
        count: i64,
    ) -> Result<Partial<Vec<char>>, ReadError> {
        Reader::read_codepoint_slice(self, index, count)
    }
}
