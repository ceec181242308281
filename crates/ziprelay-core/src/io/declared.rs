//! Read/seek view that trusts a caller-declared length.
//!
//! Uploads arrive with a size reported by the transport layer. The archive
//! inspector parses the central directory against that size, not against the
//! length of the bytes actually received, so a wrong declaration shows up as
//! a parse failure instead of being silently corrected.

use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

/// Wraps a seekable reader and reports `declared` as its end.
///
/// - `SeekFrom::End` is resolved against the declared length.
/// - Reads stop at the declared length even if more data follows.
/// - Reads past the real end of the inner reader return `0`.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use std::io::Read;
/// use std::io::Seek;
/// use std::io::SeekFrom;
/// use ziprelay_core::io::DeclaredLength;
///
/// let mut view = DeclaredLength::new(Cursor::new(b"abcdef".to_vec()), 4);
/// view.seek(SeekFrom::End(-2))?;
///
/// let mut tail = String::new();
/// view.read_to_string(&mut tail)?;
/// assert_eq!(tail, "cd");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct DeclaredLength<R> {
    inner: R,
    declared: u64,
    pos: u64,
    inner_pos: Option<u64>,
}

impl<R> DeclaredLength<R> {
    /// Creates a view over `inner` whose length is `declared`.
    ///
    /// The view starts at offset 0 regardless of where `inner` is positioned.
    #[must_use]
    pub fn new(inner: R, declared: u64) -> Self {
        Self {
            inner,
            declared,
            pos: 0,
            inner_pos: None,
        }
    }

    /// Declared length of the view.
    #[must_use]
    pub fn declared_len(&self) -> u64 {
        self.declared
    }

    /// Consumes the view and returns the inner reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Read for DeclaredLength<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.declared || buf.is_empty() {
            return Ok(0);
        }

        if self.inner_pos != Some(self.pos) {
            self.inner.seek(SeekFrom::Start(self.pos))?;
        }

        let remaining = self.declared - self.pos;
        let limit = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.inner.read(&mut buf[..limit])?;

        self.pos += n as u64;
        self.inner_pos = Some(self.pos);
        Ok(n)
    }
}

impl<R: Read + Seek> Seek for DeclaredLength<R> {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let new_pos = match target {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.declared.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };

        let new_pos = new_pos.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;

        self.pos = new_pos;
        Ok(new_pos)
    }
}
