//! The generic reader and its sequential operations.
//!
//! A [`Reader`] is a cursor over borrowed storage. The cursor is counted in
//! the storage's native units (see [`Storage`]) and may sit past the end
//! after a seek; reads from there report [`ReadError::EndOfData`].
//!
//! Besides the cursor, a reader remembers where the most recent forward
//! codepoint decode began. That mark is what [`Reader::unread_codepoint`]
//! returns to, and every other cursor operation clears it.

use core::fmt;

use crate::{
    error::{InvalidArgument, InvalidState, Op, ReadError, WriteToError},
    partial::Filled,
    sink::Sink,
    storage::Storage,
};

/// Reader over a UTF-8 byte buffer; positions are byte offsets.
pub type BytesReader<'a> = Reader<'a, [u8]>;

/// Reader over a string; positions are byte offsets.
pub type StringReader<'a> = Reader<'a, str>;

/// Reader over pre-decoded codepoints; positions are codepoint offsets.
pub type RunesReader<'a> = Reader<'a, [char]>;

/// Reference point for [`Reader::seek`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Whence {
    /// Offset from the start of the storage.
    Start,
    /// Offset from the cursor.
    Current,
    /// Offset from the end of the storage.
    End,
}

impl TryFrom<i32> for Whence {
    type Error = InvalidArgument;

    /// Maps the conventional `0`, `1`, `2` seek modes.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            _ => Err(InvalidArgument::InvalidWhence),
        }
    }
}

/// Random-access, codepoint-aware cursor over borrowed storage.
///
/// The storage is never mutated, so any number of readers can share it.
pub struct Reader<'a, S: ?Sized> {
    pub(crate) data: &'a S,
    pub(crate) pos: u64,
    pub(crate) mark: Option<usize>,
}

impl<S: ?Sized> Clone for Reader<'_, S> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            pos: self.pos,
            mark: self.mark,
        }
    }
}

impl<S: ?Sized + fmt::Debug> fmt::Debug for Reader<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("data", &self.data)
            .field("pos", &self.pos)
            .field("mark", &self.mark)
            .finish()
    }
}

impl<S: Storage + ?Sized + 'static> Default for Reader<'_, S> {
    fn default() -> Self {
        Self::new(S::empty())
    }
}

impl<'a, S: Storage + ?Sized> From<&'a S> for Reader<'a, S> {
    fn from(data: &'a S) -> Self {
        Self::new(data)
    }
}

impl<'a, S: Storage + ?Sized> Reader<'a, S> {
    /// Create a reader positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a S) -> Self {
        Self {
            data,
            pos: 0,
            mark: None,
        }
    }

    /// Point the reader at new storage, rewinding the cursor and forgetting
    /// any pending codepoint undo.
    pub fn reset(&mut self, data: &'a S) {
        *self = Self::new(data);
    }

    /// The backing storage.
    #[must_use]
    pub const fn get_ref(&self) -> &'a S {
        self.data
    }

    /// The cursor, in storage units. May exceed [`Reader::total_size`].
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.units()
    }

    /// The cursor as an in-bounds unit offset, or `None` at or past the end.
    #[inline]
    pub(crate) fn at(&self) -> Option<usize> {
        usize::try_from(self.pos).ok().filter(|&at| at < self.len())
    }

    #[inline]
    pub(crate) const fn invalid(op: Op, reason: InvalidArgument) -> ReadError {
        ReadError::argument(S::READER, op, reason)
    }

    #[inline]
    pub(crate) const fn refused(op: Op, reason: InvalidState) -> ReadError {
        ReadError::state(S::READER, op, reason)
    }

    /// Decode forward from `at`, which must be in bounds: sets the mark to
    /// `at` and leaves the cursor just past the codepoint.
    #[inline]
    pub(crate) fn decode_forward(&mut self, at: usize) -> (char, usize) {
        let (ch, size) = self.data.decode_at(at);
        self.mark = Some(at);
        self.pos = (at + size) as u64;
        (ch, size)
    }

    /// Units between the cursor and the end; zero at or past the end.
    #[must_use]
    pub fn remaining_length(&self) -> usize {
        self.at().map_or(0, |at| self.len() - at)
    }

    /// Size of the storage in units. Only [`Reader::reset`] changes it.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.len()
    }

    /// Copy bytes from the cursor into `buf`, advancing past them.
    ///
    /// `[char]` storage is re-encoded as UTF-8 and only whole codepoints are
    /// copied.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] at or past the end, and
    /// [`InvalidArgument::BufferTooSmall`] when `buf` cannot hold the next
    /// codepoint of `[char]` storage.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        self.mark = None;
        let at = self.at().ok_or(ReadError::EndOfData)?;
        let (units, written) = self
            .data
            .copy_units(at, buf)
            .map_err(|reason| Self::invalid(Op::Read, reason))?;
        self.pos += units as u64;
        Ok(written)
    }

    /// Copy bytes starting at unit `offset` into `buf` without touching the
    /// cursor or the codepoint mark.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NegativeOffset`] when `offset < 0`,
    /// [`ReadError::EndOfData`] when `offset` is at or past the end, and
    /// [`InvalidArgument::BufferTooSmall`] as for [`Reader::read`].
    pub fn read_at(&self, buf: &mut [u8], offset: i64) -> Result<Filled, ReadError> {
        if offset < 0 {
            return Err(Self::invalid(Op::ReadAt, InvalidArgument::NegativeOffset));
        }
        let at = usize::try_from(offset)
            .ok()
            .filter(|&at| at < self.len())
            .ok_or(ReadError::EndOfData)?;
        let (units, written) = self
            .data
            .copy_units(at, buf)
            .map_err(|reason| Self::invalid(Op::ReadAt, reason))?;
        Ok(Filled {
            written,
            end_of_data: written < buf.len() && at + units == self.len(),
        })
    }

    /// Read one byte and advance past it.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] at or past the end, and
    /// [`InvalidState::NotAByte`] when the codepoint under the cursor of
    /// `[char]` storage is not ASCII.
    pub fn read_byte(&mut self) -> Result<u8, ReadError> {
        self.mark = None;
        let at = self.at().ok_or(ReadError::EndOfData)?;
        let b = self
            .data
            .byte_at(at)
            .map_err(|reason| Self::refused(Op::ReadByte, reason))?;
        self.pos += 1;
        Ok(b)
    }

    /// Step the cursor back one unit.
    ///
    /// # Errors
    ///
    /// [`InvalidState::AtStart`] when the cursor is already zero.
    pub fn unread_byte(&mut self) -> Result<(), ReadError> {
        if self.pos == 0 {
            return Err(Self::refused(Op::UnreadByte, InvalidState::AtStart));
        }
        self.mark = None;
        self.pos -= 1;
        Ok(())
    }

    /// Decode the codepoint under the cursor, returning it with its encoded
    /// size, and advance past it.
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] at or past the end.
    pub fn read_codepoint(&mut self) -> Result<(char, usize), ReadError> {
        let Some(at) = self.at() else {
            self.mark = None;
            return Err(ReadError::EndOfData);
        };
        Ok(self.decode_forward(at))
    }

    /// Undo the most recent forward codepoint decode.
    ///
    /// # Errors
    ///
    /// [`InvalidState::AtStart`] when the cursor is zero, checked first, then
    /// [`InvalidState::NoPriorDecode`] when the previous operation was not a
    /// forward codepoint decode.
    pub fn unread_codepoint(&mut self) -> Result<(), ReadError> {
        if self.pos == 0 {
            return Err(Self::refused(Op::UnreadCodepoint, InvalidState::AtStart));
        }
        let mark = self
            .mark
            .take()
            .ok_or(Self::refused(Op::UnreadCodepoint, InvalidState::NoPriorDecode))?;
        self.pos = mark as u64;
        Ok(())
    }

    /// Move the cursor and return its new absolute position. Seeking past the
    /// end is allowed.
    ///
    /// The codepoint mark is cleared even when the seek fails.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NegativePosition`] when the target is below zero and
    /// [`InvalidArgument::PositionOverflow`] when it does not fit in an `i64`.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64, ReadError> {
        self.mark = None;
        let overflow = || Self::invalid(Op::Seek, InvalidArgument::PositionOverflow);
        let base = match whence {
            Whence::Start => 0,
            Whence::Current => i64::try_from(self.pos).map_err(|_| overflow())?,
            Whence::End => i64::try_from(self.len()).map_err(|_| overflow())?,
        };
        let abs = base.checked_add(offset).ok_or_else(overflow)?;
        if abs < 0 {
            return Err(Self::invalid(Op::Seek, InvalidArgument::NegativePosition));
        }
        self.pos = abs.unsigned_abs();
        Ok(self.pos)
    }

    /// [`Reader::seek`] with a conventional numeric mode: `0` start, `1`
    /// current, `2` end.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::InvalidWhence`] for any other mode, otherwise as
    /// [`Reader::seek`].
    pub fn seek_raw(&mut self, offset: i64, whence: i32) -> Result<u64, ReadError> {
        self.mark = None;
        let whence = Whence::try_from(whence).map_err(|reason| Self::invalid(Op::Seek, reason))?;
        self.seek(offset, whence)
    }

    /// Hand every remaining byte to `sink` in one call and advance past what
    /// it accepted.
    ///
    /// `[char]` storage is re-encoded as UTF-8 and the cursor advances past the
    /// codepoints the sink accepted in full. When a short write ends inside a
    /// codepoint, the reported `written` counts bytes the cursor did not move
    /// past, and the next `write_to` sends them again. At or past the end
    /// nothing is written and `Ok(0)` is returned.
    ///
    /// # Errors
    ///
    /// [`WriteToError::ShortWrite`] when the sink accepts fewer bytes than
    /// offered, [`WriteToError::Sink`] when it fails. Either way the reader
    /// remains usable.
    pub fn write_to<K: Sink + ?Sized>(
        &mut self,
        sink: &mut K,
    ) -> Result<usize, WriteToError<K::Error>> {
        self.mark = None;
        let Some(at) = self.at() else {
            return Ok(0);
        };
        let data = self.data;
        let tail = data.encoded_tail(at);
        let written = match sink.write_bytes(&tail) {
            Ok(n) => n,
            Err(source) => {
                return Err(WriteToError::Sink {
                    reader: S::READER,
                    written: 0,
                    source,
                });
            }
        };
        debug_assert!(
            written <= tail.len(),
            "sink accepted {written} of {} bytes",
            tail.len()
        );
        let written = written.min(tail.len());
        self.pos += data.units_in(at, written) as u64;
        if written < tail.len() {
            return Err(WriteToError::ShortWrite {
                reader: S::READER,
                written,
            });
        }
        Ok(written)
    }

    /// Iterate the codepoints from the cursor to the end without moving the
    /// cursor.
    #[must_use]
    pub fn codepoints(&self) -> Codepoints<'a, S> {
        Codepoints {
            data: self.data,
            at: self.at().unwrap_or(self.len()),
        }
    }
}

/// Iterator returned by [`Reader::codepoints`].
pub struct Codepoints<'a, S: ?Sized> {
    data: &'a S,
    at: usize,
}

impl<S: Storage + ?Sized> Iterator for Codepoints<'_, S> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.at >= self.data.units() {
            return None;
        }
        let (ch, size) = self.data.decode_at(self.at);
        self.at += size;
        Some(ch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.data.units().saturating_sub(self.at);
        (left.div_ceil(4), Some(left))
    }
}

impl<S: Storage + ?Sized> core::iter::FusedIterator for Codepoints<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whence_from_raw_modes() {
        assert_eq!(Whence::try_from(0), Ok(Whence::Start));
        assert_eq!(Whence::try_from(1), Ok(Whence::Current));
        assert_eq!(Whence::try_from(2), Ok(Whence::End));
        assert_eq!(Whence::try_from(3), Err(InvalidArgument::InvalidWhence));
        assert_eq!(Whence::try_from(-1), Err(InvalidArgument::InvalidWhence));
    }

    #[test]
    fn default_reader_is_empty() {
        let mut r = StringReader::default();
        assert_eq!(r.total_size(), 0);
        assert_eq!(r.remaining_length(), 0);
        assert_eq!(r.read_codepoint(), Err(ReadError::EndOfData));
        assert_eq!(r.read(&mut [0; 4]), Err(ReadError::EndOfData));
    }

    #[test]
    fn codepoints_do_not_move_the_cursor() {
        let mut r = BytesReader::new("a日b".as_bytes());
        r.read_byte().unwrap();
        let rest: alloc::string::String = r.codepoints().collect();
        assert_eq!(rest, "日b");
        assert_eq!(r.position(), 1);
    }
}
