//! Archive inspection implementation.

use std::io::Read;
use std::io::Seek;
use std::path::Path;

use tracing::debug;
use tracing::info;

use crate::RelayError;
use crate::Result;
use crate::formats::detect::SniffedType;
use crate::formats::detect::sniff_reader;
use crate::io::DeclaredLength;
use crate::report::ArchiveInfo;
use crate::report::FileInfo;

const S_IFMT: u32 = 0o170_000;
const S_IFDIR: u32 = 0o040_000;

/// Inspects an uploaded ZIP archive without extracting it.
///
/// The leading bytes are sniffed first; anything that does not start with a
/// ZIP signature is rejected before parsing. The central directory is then
/// read treating `declared_size` as the stream length, and every regular,
/// non-hidden entry is reported in directory order.
///
/// # Arguments
///
/// * `filename` - Declared name of the upload, copied into the result
/// * `reader` - Archive bytes, read from offset 0
/// * `declared_size` - Byte length reported by the caller
///
/// # Errors
///
/// - [`RelayError::NotAZipArchive`] if the signature check fails
/// - [`RelayError::MalformedArchive`] if the directory cannot be parsed with
///   the declared size
/// - [`RelayError::Io`] if the prefix cannot be read or the reader rewound
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use ziprelay_core::inspect_archive;
/// use ziprelay_core::test_utils::create_test_zip;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = create_test_zip(vec![("docs/a.txt", b"hello"), ("docs/b.png", b"png")]);
/// let size = data.len() as u64;
///
/// let info = inspect_archive("docs.zip", Cursor::new(data), size)?;
/// assert_eq!(info.total_files, 2);
/// assert_eq!(info.files[0].file_path, "a.txt");
/// # Ok(())
/// # }
/// ```
pub fn inspect_archive<R: Read + Seek>(
    filename: &str,
    mut reader: R,
    declared_size: u64,
) -> Result<ArchiveInfo> {
    reader.rewind()?;
    let sniffed = sniff_reader(&mut reader)?;
    if sniffed != SniffedType::Zip {
        debug!(
            op = "inspect.reject",
            filename,
            detected = sniffed.mime(),
            "upload is not a zip archive"
        );
        return Err(RelayError::NotAZipArchive {
            detected: sniffed.mime(),
        });
    }
    reader.rewind()?;

    let view = DeclaredLength::new(reader, declared_size);
    let mut archive = zip::ZipArchive::new(view).map_err(|e| {
        RelayError::MalformedArchive(format!("failed to read central directory: {e}"))
    })?;

    let mut info = ArchiveInfo::new(filename, declared_size);

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(|e| {
            RelayError::MalformedArchive(format!("failed to read ZIP entry {i}: {e}"))
        })?;
        let name = entry.name();

        if is_directory(entry.is_dir(), entry.unix_mode()) || is_hidden(name) {
            debug!(op = "inspect.skip", entry = name, "skipping entry");
            continue;
        }

        info.add_file(FileInfo {
            file_path: flatten_entry_path(name).to_string(),
            size: entry.size(),
            mimetype: guess_mimetype(name).to_string(),
        });
    }

    info!(
        op = "inspect.done",
        filename,
        archive_size = declared_size,
        total_files = info.total_files,
        total_size = info.total_size,
        "archive inspected"
    );

    Ok(info)
}

/// Drops everything up to and including the first `/` of an entry name.
///
/// One leading directory level is removed, not all of them, and a name with
/// no separator maps to an empty path.
///
/// # Examples
///
/// ```
/// use ziprelay_core::inspection::flatten_entry_path;
///
/// assert_eq!(flatten_entry_path("docs/sub/report.pdf"), "sub/report.pdf");
/// assert_eq!(flatten_entry_path("report.pdf"), "");
/// ```
#[must_use]
pub fn flatten_entry_path(name: &str) -> &str {
    name.split_once('/').map_or("", |(_, rest)| rest)
}

/// An entry is a directory if its name ends in `/` or its Unix mode says so.
fn is_directory(trailing_slash: bool, unix_mode: Option<u32>) -> bool {
    trailing_slash || unix_mode.is_some_and(|mode| mode & S_IFMT == S_IFDIR)
}

/// Returns `true` if the last path segment starts with `.`.
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.trim_end_matches('/')
        .rsplit('/')
        .next()
        .is_some_and(|base| base.starts_with('.'))
}

/// Content type for an entry name's extension, empty when unknown.
#[must_use]
pub fn guess_mimetype(name: &str) -> &'static str {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| mime_guess::from_ext(ext).first_raw())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::create_test_zip;
    use std::io::Cursor;

    fn inspect_bytes(data: Vec<u8>) -> Result<ArchiveInfo> {
        let size = data.len() as u64;
        inspect_archive("test.zip", Cursor::new(data), size)
    }

    #[test]
    fn test_inspect_reports_entries_in_order() {
        let data = create_test_zip(vec![("dir/file1.txt", b"1234"), ("dir/file2.jpg", b"12")]);
        let archive_size = data.len() as u64;
        let info = inspect_bytes(data).unwrap();

        assert_eq!(info.filename, "test.zip");
        assert_eq!(info.archive_size, archive_size);
        assert_eq!(info.total_files, 2);
        assert_eq!(info.total_size, 6);
        assert_eq!(info.files[0].file_path, "file1.txt");
        assert_eq!(info.files[0].size, 4);
        assert_eq!(info.files[0].mimetype, "text/plain");
        assert_eq!(info.files[1].file_path, "file2.jpg");
        assert_eq!(info.files[1].mimetype, "image/jpeg");
    }

    #[test]
    fn test_inspect_skips_directories_and_hidden() {
        let data = ZipTestBuilder::new()
            .add_directory("root/")
            .add_file("root/.DS_Store", b"junk")
            .add_file("root/visible.pdf", b"%PDF-")
            .add_file(".hidden", b"secret")
            .add_directory("root/.git/")
            .build();
        let info = inspect_bytes(data).unwrap();

        assert_eq!(info.total_files, 1);
        assert_eq!(info.files[0].file_path, "visible.pdf");
        assert_eq!(info.files[0].mimetype, "application/pdf");
        assert_eq!(info.total_size, 5);
    }

    #[test]
    fn test_inspect_uses_uncompressed_size() {
        let payload = vec![b'a'; 10_000];
        let data = ZipTestBuilder::new()
            .add_deflated_file("big/a.txt", &payload)
            .build();
        assert!(data.len() < 10_000);

        let info = inspect_bytes(data).unwrap();
        assert_eq!(info.total_size, 10_000);
    }

    #[test]
    fn test_inspect_hidden_directory_contents_are_kept() {
        // Only the base name is checked
        let data = create_test_zip(vec![("a/.config/settings.xml", b"<x/>")]);
        let info = inspect_bytes(data).unwrap();
        assert_eq!(info.total_files, 1);
        assert_eq!(info.files[0].file_path, ".config/settings.xml");
    }

    #[test]
    fn test_inspect_empty_archive() {
        let data = ZipTestBuilder::new().build();
        let info = inspect_bytes(data).unwrap();
        assert_eq!(info.total_files, 0);
        assert_eq!(info.total_size, 0);
        assert!(info.files.is_empty());
    }

    #[test]
    fn test_inspect_rejects_plain_text() {
        let result = inspect_bytes(b"just some text, not an archive".to_vec());
        assert!(matches!(
            result,
            Err(RelayError::NotAZipArchive {
                detected: "text/plain; charset=utf-8"
            })
        ));
    }

    #[test]
    fn test_inspect_rejects_empty_input() {
        let result = inspect_bytes(Vec::new());
        assert!(matches!(result, Err(RelayError::NotAZipArchive { .. })));
    }

    #[test]
    fn test_inspect_truncated_archive_is_malformed() {
        let mut data = create_test_zip(vec![("dir/a.txt", b"hello")]);
        data.truncate(data.len() - 10);
        let result = inspect_bytes(data);
        assert!(matches!(result, Err(RelayError::MalformedArchive(_))));
    }

    #[test]
    fn test_inspect_short_declared_size_is_malformed() {
        let data = create_test_zip(vec![("dir/a.txt", b"hello")]);
        let actual = data.len() as u64;

        let result = inspect_archive("a.zip", Cursor::new(data), actual - 5);
        assert!(matches!(result, Err(RelayError::MalformedArchive(_))));
    }

    #[test]
    fn test_inspect_rewinds_reader() {
        let data = create_test_zip(vec![("dir/a.txt", b"hello")]);
        let size = data.len() as u64;
        let mut cursor = Cursor::new(data);
        cursor.set_position(7);

        let info = inspect_archive("a.zip", cursor, size).unwrap();
        assert_eq!(info.total_files, 1);
    }

    /// Overwrites the external attributes of the first central directory
    /// record with a Unix mode.
    fn set_first_unix_mode(data: &mut [u8], mode: u32) {
        let header = data
            .windows(4)
            .position(|w| w == b"PK\x01\x02")
            .unwrap();
        data[header + 38..header + 42].copy_from_slice(&(mode << 16).to_le_bytes());
    }

    #[test]
    fn test_inspect_skips_directory_mode_without_slash() {
        let mut data = ZipTestBuilder::new()
            .add_file("root/assets", b"")
            .add_file("root/a.txt", b"abc")
            .build();
        set_first_unix_mode(&mut data, S_IFDIR | 0o755);

        let info = inspect_bytes(data).unwrap();
        assert_eq!(info.total_files, 1);
        assert_eq!(info.files[0].file_path, "a.txt");
    }

    #[test]
    fn test_is_directory() {
        assert!(is_directory(true, None));
        assert!(is_directory(false, Some(S_IFDIR | 0o755)));
        assert!(!is_directory(false, Some(0o100_644)));
        assert!(!is_directory(false, Some(0o120_777)));
        assert!(!is_directory(false, None));
    }

    #[test]
    fn test_flatten_entry_path() {
        assert_eq!(flatten_entry_path("a/b/c.txt"), "b/c.txt");
        assert_eq!(flatten_entry_path("docs/sub/report.pdf"), "sub/report.pdf");
        assert_eq!(flatten_entry_path("dir/file.txt"), "file.txt");
        assert_eq!(flatten_entry_path("report.pdf"), "");
        assert_eq!(flatten_entry_path("/abs/x"), "abs/x");
        assert_eq!(flatten_entry_path("trailing/"), "");
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(".env"));
        assert!(is_hidden("dir/.gitignore"));
        assert!(is_hidden("dir/.git/"));
        assert!(!is_hidden("dir/file.txt"));
        assert!(!is_hidden(".config/file.txt"));
        assert!(!is_hidden(""));
    }

    #[test]
    fn test_guess_mimetype() {
        assert_eq!(guess_mimetype("a/b.png"), "image/png");
        assert_eq!(guess_mimetype("doc.PDF"), "application/pdf");
        assert_eq!(guess_mimetype("noext"), "");
        assert_eq!(guess_mimetype("file.unknownext123"), "");
        assert_eq!(guess_mimetype("dir.v2/README"), "");
    }
}
