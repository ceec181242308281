//! Archive bundling.
//!
//! Packs uploaded files into a fresh in-memory ZIP image after checking each
//! declared content type against an allow-list. Bundling is all-or-nothing:
//! either every input ends up in the archive or no archive is produced.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use ziprelay_core::BundleConfig;
//! use ziprelay_core::BundleInput;
//! use ziprelay_core::bundle_files;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let files = vec![
//!     BundleInput::new("logo.png", "image/png", Cursor::new(b"png".to_vec())),
//!     BundleInput::new("feed.xml", "application/xml", Cursor::new(b"<a/>".to_vec())),
//! ];
//!
//! let bundle = bundle_files(files, &BundleConfig::default())?;
//! assert_eq!(bundle.file_name, "archive.zip");
//! assert_eq!(bundle.files_added, 2);
//! # Ok(())
//! # }
//! ```

pub mod zip;

use std::io::Read;
use std::time::Instant;

use tracing::debug;
use tracing::info;

use crate::RelayError;
use crate::Result;
use crate::config::BundleConfig;
use crate::report::Bundle;

/// One file to be bundled.
#[derive(Debug)]
pub struct BundleInput<R> {
    /// Original file name, used verbatim as the entry name.
    pub name: String,

    /// Content type declared by the caller.
    pub content_type: String,

    /// File contents.
    pub reader: R,
}

impl<R> BundleInput<R> {
    /// Creates a bundle input.
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            reader,
        }
    }
}

/// Bundles files into a new ZIP archive.
///
/// Every declared content type is checked against
/// `config.allowed_types` before any data is copied. Entries are written as
/// top-level entries named by their original file names, in input order.
///
/// # Errors
///
/// - [`RelayError::NoFilesProvided`] if `files` is empty
/// - [`RelayError::InvalidMimeType`] naming the first file whose declared
///   type is not allowed
/// - [`RelayError::ArchiveWriteFailure`] if any entry cannot be read or
///   written, two inputs share a name, or the archive cannot be finished
pub fn bundle_files<R: Read>(files: Vec<BundleInput<R>>, config: &BundleConfig) -> Result<Bundle> {
    if files.is_empty() {
        return Err(RelayError::NoFilesProvided);
    }

    if let Some(rejected) = files
        .iter()
        .find(|f| !config.allowed_types.permits(&f.content_type))
    {
        debug!(
            op = "bundle.reject",
            file = rejected.name.as_str(),
            content_type = rejected.content_type.as_str(),
            "content type not allowed"
        );
        return Err(RelayError::InvalidMimeType {
            file: rejected.name.clone(),
            content_type: rejected.content_type.clone(),
        });
    }

    let start = Instant::now();
    let mut bundle = Bundle {
        file_name: config.archive_name.clone(),
        ..Bundle::default()
    };

    bundle.bytes = zip::write_archive(files, &config.archive_name, &mut bundle)?;
    bundle.duration = start.elapsed();

    info!(
        op = "bundle.done",
        files = bundle.files_added,
        bytes_read = bundle.bytes_read,
        archive_size = bundle.archive_size(),
        "archive bundled"
    );

    Ok(bundle)
}
