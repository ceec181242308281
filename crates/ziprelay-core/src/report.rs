//! Results of inspection, bundling and dispatch operations.

use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Aggregate metadata of an inspected archive.
///
/// Serializes as a flat object:
///
/// ```json
/// {
///   "filename": "docs.zip",
///   "archive_size": 1024,
///   "total_size": 300,
///   "total_files": 2,
///   "files": [{ "file_path": "a.txt", "size": 100, "mimetype": "text/plain" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveInfo {
    /// Declared name of the uploaded archive.
    pub filename: String,

    /// Declared byte length of the upload.
    pub archive_size: u64,

    /// Sum of `size` over `files`.
    pub total_size: u64,

    /// Number of entries in `files`.
    pub total_files: usize,

    /// Included entries in central-directory order.
    pub files: Vec<FileInfo>,
}

impl ArchiveInfo {
    /// Creates an empty result for an upload.
    #[must_use]
    pub fn new(filename: impl Into<String>, archive_size: u64) -> Self {
        Self {
            filename: filename.into(),
            archive_size,
            ..Self::default()
        }
    }

    /// Appends an entry and updates the totals.
    pub fn add_file(&mut self, file: FileInfo) {
        self.total_size += file.size;
        self.total_files += 1;
        self.files.push(file);
    }
}

/// Metadata of one archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Entry name with its leading directory level removed.
    pub file_path: String,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Content type guessed from the extension, empty when unknown.
    pub mimetype: String,
}

/// A finished ZIP image produced by the bundler.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    /// Complete archive bytes.
    pub bytes: Vec<u8>,

    /// Suggested attachment name.
    pub file_name: String,

    /// Number of entries written.
    pub files_added: usize,

    /// Total input bytes copied into the archive.
    pub bytes_read: u64,

    /// Duration of the bundling operation.
    pub duration: Duration,
}

impl Bundle {
    /// Size of the archive image in bytes.
    #[must_use]
    pub fn archive_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Compression ratio (input bytes / archive bytes).
    ///
    /// Returns 0.0 for an empty image.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes.is_empty() {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes.len() as f64
    }
}

/// Outcome of a completed mail dispatch.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Recipients sent to, in send order.
    pub delivered: Vec<String>,

    /// Bytes of the attachment consumed by the first send.
    pub attachment_size: u64,

    /// Duration of the whole dispatch.
    pub duration: Duration,
}

impl DispatchReport {
    /// Number of recipients that were sent to.
    #[must_use]
    pub fn recipients_sent(&self) -> usize {
        self.delivered.len()
    }
}

/// Callback trait for progress reporting during mail dispatch.
///
/// Implement this trait to drive a progress bar or log while recipients are
/// processed sequentially.
pub trait DispatchProgress {
    /// Called before sending to a recipient.
    ///
    /// * `recipient` - Address about to be sent to
    /// * `total` - Number of recipients in the dispatch
    /// * `current` - Position of this recipient (1-indexed)
    fn on_recipient_start(&mut self, recipient: &str, total: usize, current: usize);

    /// Called after the transport accepted the message for `recipient`.
    fn on_recipient_sent(&mut self, recipient: &str);

    /// Called once after every recipient was sent to.
    ///
    /// Not called when the dispatch fails.
    fn on_complete(&mut self);
}

/// No-op implementation of `DispatchProgress`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl DispatchProgress for NoopProgress {
    fn on_recipient_start(&mut self, _recipient: &str, _total: usize, _current: usize) {}

    fn on_recipient_sent(&mut self, _recipient: &str) {}

    fn on_complete(&mut self) {}
}
