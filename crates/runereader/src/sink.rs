use alloc::vec::Vec;
use core::convert::Infallible;

/// Destination for [`RuneReader::write_to`](crate::RuneReader::write_to).
///
/// A sink is offered every remaining byte in one call and reports how many it
/// accepted. Accepting fewer is a short write, not a failure of the sink.
pub trait Sink {
    /// The sink's own failure type.
    type Error: core::error::Error + 'static;

    /// Accept a prefix of `bytes`, returning its length.
    ///
    /// # Errors
    ///
    /// Whatever the underlying destination reports.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;
}

impl Sink for Vec<u8> {
    type Error = Infallible;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

/// A fixed-size window that fills front to back and shrinks as it is written,
/// like `std::io::Write` for `&mut [u8]`.
impl Sink for &mut [u8] {
    type Error = Infallible;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        let n = bytes.len().min(self.len());
        let (head, tail) = core::mem::take(self).split_at_mut(n);
        head.copy_from_slice(&bytes[..n]);
        *self = tail;
        Ok(n)
    }
}
