//! `std::io` adapters.
//!
//! Readers over encoded storage implement [`io::Read`], every reader
//! implements [`io::Seek`], and [`IoSink`] lets `write_to` drain into an
//! [`io::Write`]. `[char]` storage has no `io::Read`: its cursor cannot stop
//! inside a codepoint, so it cannot fill an arbitrarily small buffer.
//!
//! End of data maps to `Ok(0)` from `read`, every other [`ReadError`] to
//! [`io::ErrorKind::InvalidInput`].

use std::io;

use crate::{
    error::{InvalidArgument, Op, ReadError},
    reader::{Reader, Whence},
    sink::Sink,
    storage::{EncodedStorage, Storage},
};

impl From<ReadError> for io::Error {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::EndOfData => io::Error::from(io::ErrorKind::UnexpectedEof),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

impl<S: EncodedStorage + ?Sized> io::Read for Reader<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match Reader::read(self, buf) {
            Ok(n) => Ok(n),
            Err(ReadError::EndOfData) => Ok(0),
            Err(err) => Err(err.into()),
        }
    }
}

impl<S: Storage + ?Sized> io::Seek for Reader<'_, S> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            io::SeekFrom::Start(n) => {
                let offset = i64::try_from(n).map_err(|_| {
                    Self::invalid(Op::Seek, InvalidArgument::PositionOverflow)
                })?;
                (offset, Whence::Start)
            }
            io::SeekFrom::Current(n) => (n, Whence::Current),
            io::SeekFrom::End(n) => (n, Whence::End),
        };
        Ok(Reader::seek(self, offset, whence)?)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position())
    }
}

/// Adapts an [`io::Write`] into a [`Sink`].
///
/// The sink makes a single `write` call per `write_to`, so a writer that
/// accepts a prefix produces a short write rather than being retried.
#[derive(Debug, Default)]
pub struct IoSink<W>(pub W);

impl<W> IoSink<W> {
    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    type Error = io::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        loop {
            match self.0.write(bytes) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        error::Error as _,
        io::{Read, Seek, SeekFrom, Write},
        string::{String, ToString},
        vec::Vec,
    };

    use super::*;
    use crate::{
        error::{ErrorKind, WriteToError},
        reader::{RunesReader, StringReader},
    };

    /// Fails with `Interrupted` a set number of times before accepting.
    struct Interrupting {
        interrupts: usize,
        out: Vec<u8>,
    }

    impl Write for Interrupting {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.interrupts > 0 {
                self.interrupts -= 1;
                return Err(io::ErrorKind::Interrupted.into());
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl Write for Failing {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn read_to_string_through_io() {
        let mut r = StringReader::new("héllo");
        r.read_codepoint().unwrap();
        let mut out = String::new();
        r.read_to_string(&mut out).unwrap();
        assert_eq!(out, "éllo");
    }

    #[test]
    fn runes_reencode_into_io_sink() {
        let runes = ['日', '本', '語'];
        let mut r = RunesReader::new(&runes);
        r.read_codepoint().unwrap();
        let mut sink = IoSink(Vec::new());
        assert_eq!(r.write_to(&mut sink).unwrap(), 6);
        assert_eq!(sink.into_inner(), "本語".as_bytes());
        assert_eq!(r.remaining_length(), 0);
    }

    #[test]
    fn bytes_read_to_end_through_io() {
        let mut r = crate::reader::BytesReader::new("日本語".as_bytes());
        let mut out = Vec::new();
        r.read_to_end(&mut out).unwrap();
        assert_eq!(out, "日本語".as_bytes());
        assert_eq!(Read::read(&mut r, &mut [0; 4]).unwrap(), 0);
    }

    #[test]
    fn seek_maps_io_positions() {
        let mut r = StringReader::new("stuff");
        assert_eq!(Seek::seek(&mut r, SeekFrom::End(-2)).unwrap(), 3);
        assert_eq!(r.stream_position().unwrap(), 3);
        let err = Seek::seek(&mut r, SeekFrom::Current(-4)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = Seek::seek(&mut r, SeekFrom::Start(u64::MAX)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn io_sink_drains_into_writer() {
        let mut r = StringReader::new("abc");
        let mut sink = IoSink(Vec::new());
        assert_eq!(r.write_to(&mut sink).unwrap(), 3);
        assert_eq!(sink.into_inner(), b"abc");
    }

    #[test]
    fn io_sink_retries_interrupted_writes() {
        let mut r = StringReader::new("stuff");
        let mut sink = IoSink(Interrupting {
            interrupts: 2,
            out: Vec::new(),
        });
        assert_eq!(r.write_to(&mut sink).unwrap(), 5);
        let writer = sink.into_inner();
        assert_eq!(writer.interrupts, 0);
        assert_eq!(writer.out, b"stuff");
    }

    #[test]
    fn sink_failure_keeps_the_cursor() {
        let mut r = StringReader::new("stuff");
        r.read_byte().unwrap();
        let err = r.write_to(&mut IoSink(Failing)).unwrap_err();
        assert!(matches!(err, WriteToError::Sink { written: 0, .. }));
        assert_eq!(err.kind(), ErrorKind::Sink);
        assert_eq!(err.written(), 0);
        assert_eq!(
            err.to_string(),
            "StringReader.write_to: sink failed after 0 bytes"
        );
        let source = err.source().expect("sink error is chained");
        assert_eq!(source.to_string(), "disk full");
        assert_eq!(r.position(), 1);
        assert_eq!(r.read_codepoint(), Ok(('t', 1)));
    }
}
