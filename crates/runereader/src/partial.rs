use crate::error::ReadError;

/// A run of codepoints that may have stopped short at the end of the storage.
///
/// Reaching the end before `count` codepoints were decoded is not an error:
/// the decoded prefix is still delivered, with `end_of_data` set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial<T> {
    /// The decoded run.
    pub value: T,
    /// Encoded size of the run: bytes for encoded storage, codepoints for
    /// `[char]` storage.
    pub size: usize,
    /// The storage ran out before the requested count was reached.
    pub end_of_data: bool,
}

impl<T> Partial<T> {
    /// Discard the end-of-data flag.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Treat a short run as [`ReadError::EndOfData`].
    ///
    /// # Errors
    ///
    /// [`ReadError::EndOfData`] when `end_of_data` is set.
    pub fn complete(self) -> Result<T, ReadError> {
        if self.end_of_data {
            Err(ReadError::EndOfData)
        } else {
            Ok(self.value)
        }
    }

    /// Transform the value, keeping the size and flag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Partial<U> {
        Partial {
            value: f(self.value),
            size: self.size,
            end_of_data: self.end_of_data,
        }
    }
}

/// Outcome of a positional `read_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filled {
    /// Bytes copied into the caller's buffer.
    pub written: usize,
    /// The storage ended before the buffer was full.
    pub end_of_data: bool,
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec};

    use super::*;
    use crate::reader::StringReader;

    #[test]
    fn complete_rejects_short_runs() {
        let mut r = StringReader::new("日本語");
        let short = r.read_codepoint_slice(3, 5).unwrap();
        assert_eq!(short.clone().into_value(), vec!['本', '語']);
        let err = short.complete().unwrap_err();
        assert!(err.is_end_of_data());
        assert!(!r.read_codepoint_at(-1).unwrap_err().is_end_of_data());

        let full = r.read_codepoint_slice(0, 2).unwrap();
        assert_eq!(full.complete(), Ok(vec!['日', '本']));
    }

    #[test]
    fn map_keeps_size_and_flag() {
        let mut r = StringReader::new("stuff");
        let run = r
            .read_codepoint_slice(2, 9)
            .unwrap()
            .map(|cps| cps.into_iter().collect::<String>());
        assert_eq!(
            run,
            Partial {
                value: String::from("uff"),
                size: 3,
                end_of_data: true,
            }
        );
    }
}
