//! Content-type sniffing from leading bytes.
//!
//! Only the archive inspector sniffs. Bundling and mailing trust the content
//! type declared by the caller.

use std::io::Read;

/// Number of leading bytes the sniffer looks at.
pub const SNIFF_LEN: usize = 512;

/// ZIP local file header signature.
const ZIP_LOCAL_HEADER: [u8; 4] = *b"PK\x03\x04";

/// ZIP end of central directory signature, the first record of an empty archive.
const ZIP_END_OF_DIRECTORY: [u8; 4] = *b"PK\x05\x06";

const PDF_MAGIC: &[u8] = b"%PDF-";
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xFF\xD8\xFF";
const GZIP_MAGIC: &[u8] = b"\x1F\x8B\x08";

/// Content types the sniffer can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedType {
    /// ZIP archive.
    Zip,
    /// PDF document.
    Pdf,
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// Gzip stream.
    Gzip,
    /// No binary control bytes in the window.
    Text,
    /// Anything else.
    Unknown,
}

impl SniffedType {
    /// MIME type reported for this classification.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Zip => "application/zip",
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gzip => "application/x-gzip",
            Self::Text => "text/plain; charset=utf-8",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// Classifies a byte prefix.
///
/// At most [`SNIFF_LEN`] bytes are considered.
///
/// # Examples
///
/// ```
/// use ziprelay_core::formats::detect::SniffedType;
/// use ziprelay_core::formats::detect::sniff_content_type;
///
/// assert_eq!(sniff_content_type(b"PK\x03\x04rest"), SniffedType::Zip);
/// assert_eq!(sniff_content_type(b"hello world"), SniffedType::Text);
/// ```
#[must_use]
pub fn sniff_content_type(prefix: &[u8]) -> SniffedType {
    let window = &prefix[..prefix.len().min(SNIFF_LEN)];

    if window.starts_with(&ZIP_LOCAL_HEADER) || window.starts_with(&ZIP_END_OF_DIRECTORY) {
        SniffedType::Zip
    } else if window.starts_with(PDF_MAGIC) {
        SniffedType::Pdf
    } else if window.starts_with(PNG_MAGIC) {
        SniffedType::Png
    } else if window.starts_with(JPEG_MAGIC) {
        SniffedType::Jpeg
    } else if window.starts_with(GZIP_MAGIC) {
        SniffedType::Gzip
    } else if !window.iter().copied().any(is_binary_byte) {
        SniffedType::Text
    } else {
        SniffedType::Unknown
    }
}

/// Reads up to [`SNIFF_LEN`] bytes from `reader` and classifies them.
///
/// Short inputs are fine; the reader is left positioned after the bytes
/// consumed.
pub fn sniff_reader<R: Read>(reader: &mut R) -> std::io::Result<SniffedType> {
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    reader
        .by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)?;
    Ok(sniff_content_type(&prefix))
}

const fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_sniff_zip_local_header() {
        assert_eq!(sniff_content_type(b"PK\x03\x04\x14\x00"), SniffedType::Zip);
    }

    #[test]
    fn test_sniff_empty_zip() {
        let mut eocd = b"PK\x05\x06".to_vec();
        eocd.extend_from_slice(&[0u8; 18]);
        assert_eq!(sniff_content_type(&eocd), SniffedType::Zip);
    }

    #[test]
    fn test_sniff_other_formats() {
        assert_eq!(sniff_content_type(b"%PDF-1.7\n"), SniffedType::Pdf);
        assert_eq!(
            sniff_content_type(b"\x89PNG\r\n\x1a\n\x00\x00"),
            SniffedType::Png
        );
        assert_eq!(sniff_content_type(b"\xFF\xD8\xFF\xE0"), SniffedType::Jpeg);
        assert_eq!(sniff_content_type(b"\x1F\x8B\x08\x00"), SniffedType::Gzip);
    }

    #[test]
    fn test_sniff_text_and_binary() {
        assert_eq!(sniff_content_type(b"plain text\r\n\tline"), SniffedType::Text);
        assert_eq!(sniff_content_type(b""), SniffedType::Text);
        assert_eq!(sniff_content_type(b"\x00\x01\x02"), SniffedType::Unknown);
    }

    #[test]
    fn test_signature_must_lead() {
        // Signature past the first byte is not a ZIP
        assert_ne!(sniff_content_type(b" PK\x03\x04"), SniffedType::Zip);
        assert_ne!(sniff_content_type(b"PK\x01\x02"), SniffedType::Zip);
    }

    #[test]
    fn test_binary_beyond_window_ignored() {
        let mut data = vec![b'a'; SNIFF_LEN];
        data.push(0x00);
        assert_eq!(sniff_content_type(&data), SniffedType::Text);
    }

    #[test]
    fn test_sniff_reader_consumes_window_only() {
        let data = vec![b'x'; SNIFF_LEN * 2];
        let mut cursor = Cursor::new(data);
        assert_eq!(sniff_reader(&mut cursor).unwrap(), SniffedType::Text);
        assert_eq!(cursor.position(), SNIFF_LEN as u64);
    }

    #[test]
    fn test_mime_strings() {
        assert_eq!(SniffedType::Zip.mime(), "application/zip");
        assert_eq!(SniffedType::Unknown.mime(), "application/octet-stream");
    }
}
