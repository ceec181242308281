//! ZIP container writing for the bundler.

use std::io::Cursor;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;

use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::BundleInput;
use crate::RelayError;
use crate::Result;
use crate::report::Bundle;

/// Copy buffer size.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Writes every input as a deflated top-level entry and returns the image.
///
/// `bundle` receives the entry and byte counts. On error the partially
/// written image is dropped.
pub(crate) fn write_archive<R: Read>(
    files: Vec<BundleInput<R>>,
    archive_name: &str,
    bundle: &mut Bundle,
) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for mut input in files {
        zip.start_file(input.name.as_str(), options)
            .map_err(|e| write_failure(&input.name, &e))?;

        let copied = copy_entry(&mut input.reader, &mut zip, &mut buffer)
            .map_err(|e| write_failure(&input.name, &e))?;

        debug!(op = "bundle.entry", file = input.name.as_str(), bytes = copied, "entry written");
        bundle.files_added += 1;
        bundle.bytes_read += copied;
    }

    let cursor = zip
        .finish()
        .map_err(|e| write_failure(archive_name, &e))?;

    Ok(cursor.into_inner())
}

fn copy_entry<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut [u8],
) -> std::io::Result<u64> {
    let mut copied = 0u64;
    loop {
        let n = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..n])?;
        copied += n as u64;
    }
    Ok(copied)
}

fn write_failure(file: &str, err: &dyn std::fmt::Display) -> RelayError {
    RelayError::ArchiveWriteFailure {
        file: file.to_string(),
        reason: err.to_string(),
    }
}
