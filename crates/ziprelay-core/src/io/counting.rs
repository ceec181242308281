//! Counting reader for tracking bytes consumed.
//!
//! The dispatcher wraps the attachment in a `CountingReader` for every send
//! so the report can state how much of the attachment a transport consumed.

use std::io::Read;

/// Wrapper reader that tracks total bytes read.
///
/// The counter only increments on successful reads.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use ziprelay_core::io::CountingReader;
///
/// let mut reader = CountingReader::new(&b"Hello, World!"[..]);
/// let mut out = String::new();
/// reader.read_to_string(&mut out)?;
///
/// assert_eq!(reader.total_bytes(), 13);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingReader<R> {
    inner: R,
    bytes_read: u64,
}

impl<R> CountingReader<R> {
    /// Creates a new counting reader.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Returns the total number of bytes successfully read.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes_read
    }

    /// Consumes the counting reader and returns the inner reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let bytes = self.inner.read(buf)?;
        self.bytes_read += bytes as u64;
        Ok(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_counting_reader_basic() {
        let mut reader = CountingReader::new(Cursor::new(b"Hello".to_vec()));
        let mut buf = [0u8; 3];

        reader.read_exact(&mut buf).unwrap();
        assert_eq!(reader.total_bytes(), 3);

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(reader.total_bytes(), 5);
        assert_eq!(rest, b"lo");
    }

    #[test]
    fn test_counting_reader_empty() {
        let mut reader = CountingReader::new(&b""[..]);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(reader.total_bytes(), 0);
    }

    #[test]
    fn test_counting_reader_partial_read() {
        struct Trickle<'a>(&'a [u8]);

        impl Read for Trickle<'_> {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let n = buf.len().min(self.0.len()).min(2);
                buf[..n].copy_from_slice(&self.0[..n]);
                self.0 = &self.0[n..];
                Ok(n)
            }
        }

        let mut reader = CountingReader::new(Trickle(b"abcde"));
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(reader.total_bytes(), 2);

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(reader.total_bytes(), 5);
    }

    #[test]
    fn test_counting_reader_into_inner() {
        let mut reader = CountingReader::new(Cursor::new(vec![1u8, 2, 3]));
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf).unwrap();

        let cursor = reader.into_inner();
        assert_eq!(cursor.position(), 1);
    }
}
