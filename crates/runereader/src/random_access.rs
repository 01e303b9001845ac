//! Absolute-index codepoint reads.
//!
//! Every operation here takes an index in the storage's native units, moves
//! the cursor there and decodes. The index is validated before anything
//! moves: a rejected call only clears the codepoint mark.

use alloc::{borrow::Cow, string::String, vec::Vec};

use crate::{
    error::{InvalidArgument, Op, ReadError},
    partial::Partial,
    reader::Reader,
    storage::{EncodedStorage, Storage},
};

/// Unit range covered by an accumulated run.
struct Run {
    start: usize,
    end: usize,
    size: usize,
    end_of_data: bool,
}

impl<S: Storage + ?Sized> Reader<'_, S> {
    /// Validate a starting index: negative is an argument error, at or past
    /// the end is [`ReadError::EndOfData`].
    fn start_at(&self, op: Op, index: i64) -> Result<usize, ReadError> {
        if index < 0 {
            return Err(Self::invalid(op, InvalidArgument::NegativePosition));
        }
        usize::try_from(index)
            .ok()
            .filter(|&at| at < self.len())
            .ok_or(ReadError::EndOfData)
    }

    /// Seek to `index` and decode the codepoint there.
    ///
    /// Returns the codepoint and its encoded size: 1 for `[char]` storage,
    /// 1 to 4 bytes otherwise. The cursor ends just past it and a following
    /// [`Reader::unread_codepoint`] returns to `index`.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NegativePosition`] when `index < 0`,
    /// [`ReadError::EndOfData`] when `index` is at or past the end.
    pub fn read_codepoint_at(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        self.mark = None;
        let at = self.start_at(Op::ReadCodepointAt, index)?;
        Ok(self.decode_forward(at))
    }

    /// Decode the codepoint that ends just before `index`, leaving the cursor
    /// at its first unit.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::ZeroOrNegativePosition`] when `index <= 0`,
    /// [`ReadError::EndOfData`] when `index` is at or past the end.
    pub fn read_prev_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        self.mark = None;
        if index <= 0 {
            return Err(Self::invalid(
                Op::ReadPrevCodepointFrom,
                InvalidArgument::ZeroOrNegativePosition,
            ));
        }
        let end = usize::try_from(index)
            .ok()
            .filter(|&end| end < self.len())
            .ok_or(ReadError::EndOfData)?;
        let (ch, size) = self.data.decode_before(end);
        self.pos = (end - size) as u64;
        Ok((ch, size))
    }

    /// Skip the codepoint at `index` and decode the one after it.
    ///
    /// The cursor ends just past the returned codepoint; a following
    /// [`Reader::unread_codepoint`] returns to its start.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NegativePosition`] when `index < 0`,
    /// [`ReadError::EndOfData`] when `index` is at or past the end or the
    /// codepoint at `index` is the last one. The cursor does not move on
    /// either.
    pub fn read_next_codepoint_from(&mut self, index: i64) -> Result<(char, usize), ReadError> {
        self.mark = None;
        let at = self.start_at(Op::ReadNextCodepointFrom, index)?;
        let (_, skip) = self.data.decode_at(at);
        let next = at + skip;
        if next >= self.len() {
            return Err(ReadError::EndOfData);
        }
        Ok(self.decode_forward(next))
    }

    /// Decode up to `count` codepoints starting at `index`, feeding each to
    /// `each`. The mark is recorded before every decode, so it ends on the
    /// start of the last codepoint.
    fn accumulate(
        &mut self,
        op: Op,
        index: i64,
        count: i64,
        mut each: impl FnMut(char),
    ) -> Result<Run, ReadError> {
        self.mark = None;
        if index < 0 {
            return Err(Self::invalid(op, InvalidArgument::NegativePosition));
        }
        if count < 1 {
            return Err(Self::invalid(op, InvalidArgument::ZeroOrNegativeCount));
        }
        let start = self.start_at(op, index)?;
        let len = self.len();

        let mut at = start;
        let mut size = 0;
        let mut left = count;
        let mut end_of_data = false;
        while left > 0 {
            if at >= len {
                end_of_data = true;
                break;
            }
            let (ch, sz) = self.decode_forward(at);
            each(ch);
            size += sz;
            at += sz;
            left -= 1;
        }
        Ok(Run {
            start,
            end: at,
            size,
            end_of_data,
        })
    }

    /// Decode up to `count` consecutive codepoints starting at `index`.
    ///
    /// Running out of storage part way is reported through
    /// [`Partial::end_of_data`] with the decoded prefix kept. `size` sums the
    /// encoded sizes, not the codepoint count.
    ///
    /// # Errors
    ///
    /// [`InvalidArgument::NegativePosition`] when `index < 0`,
    /// [`InvalidArgument::ZeroOrNegativeCount`] when `count < 1`, and
    /// [`ReadError::EndOfData`] when `index` is at or past the end.
    pub fn read_codepoint_slice(
        &mut self,
        index: i64,
        count: i64,
    ) -> Result<Partial<Vec<char>>, ReadError> {
        let mut runes = Vec::new();
        let run = self.accumulate(Op::ReadCodepointSlice, index, count, |ch| runes.push(ch))?;
        Ok(Partial {
            value: runes,
            size: run.size,
            end_of_data: run.end_of_data,
        })
    }
}

impl<'a, S: EncodedStorage + ?Sized> Reader<'a, S> {
    /// The encoded bytes of up to `count` codepoints starting at `index`.
    ///
    /// `count` counts codepoints, so the slice always ends on a codepoint
    /// boundary as seen from `index`. Cursor, mark and errors are as for
    /// [`Reader::read_codepoint_slice`].
    ///
    /// # Errors
    ///
    /// As [`Reader::read_codepoint_slice`].
    pub fn read_byte_slice(
        &mut self,
        index: i64,
        count: i64,
    ) -> Result<Partial<&'a [u8]>, ReadError> {
        let run = self.accumulate(Op::ReadByteSlice, index, count, |_| {})?;
        let data: &'a S = self.data;
        Ok(Partial {
            value: &data.as_encoded()[run.start..run.end],
            size: run.size,
            end_of_data: run.end_of_data,
        })
    }

    /// [`Reader::read_byte_slice`] as text.
    ///
    /// Borrows from the storage when the bytes are valid UTF-8; malformed
    /// sequences are replaced with `U+FFFD` in an owned copy.
    ///
    /// # Errors
    ///
    /// As [`Reader::read_codepoint_slice`].
    pub fn read_string(
        &mut self,
        index: i64,
        count: i64,
    ) -> Result<Partial<Cow<'a, str>>, ReadError> {
        let run = self.accumulate(Op::ReadString, index, count, |_| {})?;
        let data: &'a S = self.data;
        Ok(Partial {
            value: String::from_utf8_lossy(&data.as_encoded()[run.start..run.end]),
            size: run.size,
            end_of_data: run.end_of_data,
        })
    }
}
