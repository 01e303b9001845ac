use core::fmt;

use thiserror::Error;

/// Coarse classification shared by [`ReadError`] and [`WriteToError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed a position, count or seek mode that can never be
    /// valid.
    InvalidArgument,
    /// The requested position is at or past the end of the storage.
    EndOfData,
    /// The reader is not in a state that allows the operation.
    InvalidState,
    /// The sink accepted fewer bytes than were offered.
    ShortWrite,
    /// The sink reported its own failure.
    Sink,
}

/// Which reader operation produced an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Op {
    Read,
    ReadAt,
    ReadByte,
    UnreadByte,
    ReadCodepoint,
    UnreadCodepoint,
    Seek,
    WriteTo,
    ReadCodepointAt,
    ReadPrevCodepointFrom,
    ReadNextCodepointFrom,
    ReadCodepointSlice,
    ReadByteSlice,
    ReadString,
}

impl Op {
    /// The method name as it appears on [`crate::RuneReader`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Op::Read => "read",
            Op::ReadAt => "read_at",
            Op::ReadByte => "read_byte",
            Op::UnreadByte => "unread_byte",
            Op::ReadCodepoint => "read_codepoint",
            Op::UnreadCodepoint => "unread_codepoint",
            Op::Seek => "seek",
            Op::WriteTo => "write_to",
            Op::ReadCodepointAt => "read_codepoint_at",
            Op::ReadPrevCodepointFrom => "read_prev_codepoint_from",
            Op::ReadNextCodepointFrom => "read_next_codepoint_from",
            Op::ReadCodepointSlice => "read_codepoint_slice",
            Op::ReadByteSlice => "read_byte_slice",
            Op::ReadString => "read_string",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an argument was rejected.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum InvalidArgument {
    /// `read_at` was given an offset below zero.
    #[error("negative offset")]
    NegativeOffset,
    /// The index, or the absolute target of a seek, is below zero.
    #[error("negative position")]
    NegativePosition,
    /// Position zero has no predecessor.
    #[error("zero or negative position")]
    ZeroOrNegativePosition,
    /// A run must contain at least one codepoint.
    #[error("zero or negative count")]
    ZeroOrNegativeCount,
    /// A raw seek mode outside of start/current/end.
    #[error("invalid whence")]
    InvalidWhence,
    /// The absolute target of a seek does not fit in an `i64`.
    #[error("position overflow")]
    PositionOverflow,
    /// The buffer cannot hold the next encoded codepoint.
    #[error("buffer too small for the next codepoint")]
    BufferTooSmall,
}

/// Why the reader refused to step backward or hand out a byte.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum InvalidState {
    /// The cursor is already at the start of the storage.
    #[error("at beginning of data")]
    AtStart,
    /// The previous operation was not a forward codepoint decode.
    #[error("previous operation was not a codepoint read")]
    NoPriorDecode,
    /// The codepoint under the cursor is wider than one byte.
    #[error("codepoint does not fit in a byte")]
    NotAByte,
}

/// Error returned by every reader operation except `write_to`.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq, Hash)]
pub enum ReadError {
    /// The cursor or requested index is at or past the end of the storage.
    #[error("end of data")]
    EndOfData,
    /// The caller supplied an argument that can never succeed.
    #[error("{reader}.{op}: {reason}")]
    InvalidArgument {
        /// Name of the reader variant.
        reader: &'static str,
        /// The failing operation.
        op: Op,
        /// What was wrong with the argument.
        reason: InvalidArgument,
    },
    /// The reader's state does not allow the operation.
    #[error("{reader}.{op}: {reason}")]
    InvalidState {
        /// Name of the reader variant.
        reader: &'static str,
        /// The failing operation.
        op: Op,
        /// Which state check failed.
        reason: InvalidState,
    },
}

impl ReadError {
    pub(crate) const fn argument(reader: &'static str, op: Op, reason: InvalidArgument) -> Self {
        ReadError::InvalidArgument { reader, op, reason }
    }

    pub(crate) const fn state(reader: &'static str, op: Op, reason: InvalidState) -> Self {
        ReadError::InvalidState { reader, op, reason }
    }

    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ReadError::EndOfData => ErrorKind::EndOfData,
            ReadError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ReadError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }

    /// `true` for [`ReadError::EndOfData`].
    #[must_use]
    pub const fn is_end_of_data(&self) -> bool {
        matches!(self, ReadError::EndOfData)
    }
}

/// Error returned by `write_to`.
///
/// Both variants carry the number of bytes the sink accepted. The reader's
/// cursor has already advanced past them, or for `[char]` storage past the
/// codepoints they cover in full.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WriteToError<E: core::error::Error + 'static> {
    /// The sink returned a count smaller than the bytes offered.
    #[error("{reader}.write_to: short write after {written} bytes")]
    ShortWrite {
        /// Name of the reader variant.
        reader: &'static str,
        /// Bytes accepted by the sink.
        written: usize,
    },
    /// The sink failed.
    #[error("{reader}.write_to: sink failed after {written} bytes")]
    Sink {
        /// Name of the reader variant.
        reader: &'static str,
        /// Bytes accepted by the sink before it failed.
        written: usize,
        /// The sink's own error.
        #[source]
        source: E,
    },
}

impl<E: core::error::Error + 'static> WriteToError<E> {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            WriteToError::ShortWrite { .. } => ErrorKind::ShortWrite,
            WriteToError::Sink { .. } => ErrorKind::Sink,
        }
    }

    /// Bytes transferred before the write stopped.
    #[must_use]
    pub const fn written(&self) -> usize {
        match self {
            WriteToError::ShortWrite { written, .. } | WriteToError::Sink { written, .. } => {
                *written
            }
        }
    }
}
