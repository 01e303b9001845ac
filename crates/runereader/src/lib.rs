//! Random-access, codepoint-aware readers over borrowed text.
//!
//! Three storage shapes are supported behind one generic [`Reader`]:
//!
//! * [`BytesReader`] over a `[u8]` holding UTF-8, indexed by byte;
//! * [`StringReader`] over a `str`, indexed by byte;
//! * [`RunesReader`] over a `[char]`, indexed by codepoint.
//!
//! Besides the usual sequential operations (`read`, `read_byte`,
//! `read_codepoint`, `seek`, ...) every reader can decode at an absolute
//! index without the caller seeking first:
//!
//! ```rust
//! use runereader::{StringReader, ReadError};
//!
//! let mut r = StringReader::new("日本語");
//! assert_eq!(r.read_codepoint_at(3), Ok(('本', 3)));
//! assert_eq!(r.read_prev_codepoint_from(6), Ok(('本', 3)));
//! assert_eq!(r.read_next_codepoint_from(0), Ok(('本', 3)));
//! assert_eq!(r.read_next_codepoint_from(6), Err(ReadError::EndOfData));
//!
//! let run = r.read_string(3, 5).unwrap();
//! assert_eq!(run.value, "本語");
//! assert!(run.end_of_data);
//! ```
//!
//! Malformed UTF-8 never fails a decode: it yields `U+FFFD` and the cursor
//! advances past the offending bytes.
//!
//! The crate is `no_std` with `alloc`. The default `std` feature adds
//! `std::io::Read`/`Seek` impls and [`IoSink`].

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod factory;
#[cfg(feature = "std")]
mod io;
mod partial;
mod random_access;
mod reader;
mod rune_reader;
mod sink;
pub mod storage;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, InvalidArgument, InvalidState, Op, ReadError, WriteToError};
pub use factory::{AnyReader, new_rune_reader};
#[cfg(feature = "std")]
pub use io::IoSink;
pub use partial::{Filled, Partial};
pub use reader::{BytesReader, Codepoints, Reader, RunesReader, StringReader, Whence};
pub use rune_reader::RuneReader;
pub use sink::Sink;
pub use storage::{EncodedStorage, Storage};
