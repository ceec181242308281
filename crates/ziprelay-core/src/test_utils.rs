//! Test utilities for archive creation and mail capture.
//!
//! This module provides reusable helpers for building in-memory ZIP images
//! and an in-memory [`MailTransport`] that records what would have been sent.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::TransportError;
use crate::mail::MailTransport;
use crate::mail::OutgoingMessage;

/// Creates an in-memory ZIP archive from a list of entries.
///
/// Each entry is a tuple of (path, content). Files are stored uncompressed
/// with mode 0o644.
///
/// # Examples
///
/// ```
/// use ziprelay_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("dir/file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// assert_eq!(&zip_data[..4], b"PK\x03\x04");
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Builder for creating ZIP test archives with files and directories.
///
/// # Examples
///
/// ```
/// use ziprelay_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_deflated_file("dir/big.txt", &[b'x'; 4096])
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, CompressionMethod::Stored)
    }

    /// Adds a deflated file.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, CompressionMethod::Deflated)
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    fn add_with_method(mut self, path: &str, data: &[u8], method: CompressionMethod) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A message captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Attachment file name.
    pub attachment_name: String,
    /// Attachment content type.
    pub attachment_type: String,
    /// Attachment bytes as read by the transport.
    pub attachment: Vec<u8>,
}

/// In-memory transport that records every send.
///
/// With [`failing_on`](Self::failing_on) the n-th attempt (1-indexed) fails
/// without recording a message.
///
/// # Examples
///
/// ```
/// use ziprelay_core::test_utils::RecordingTransport;
///
/// let transport = RecordingTransport::failing_on(2);
/// assert!(transport.sent.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    /// Successfully sent messages, in order.
    pub sent: Vec<SentMail>,
    /// Every recipient a send was attempted for, in order.
    pub attempts: Vec<String>,
    fail_on: Option<usize>,
}

impl RecordingTransport {
    /// Creates a transport whose `attempt`-th send fails.
    #[must_use]
    pub fn failing_on(attempt: usize) -> Self {
        Self {
            fail_on: Some(attempt),
            ..Self::default()
        }
    }
}

impl MailTransport for RecordingTransport {
    fn send(
        &mut self,
        message: &OutgoingMessage<'_>,
        attachment: &mut dyn Read,
    ) -> Result<(), TransportError> {
        self.attempts.push(message.to.to_string());
        if self.fail_on == Some(self.attempts.len()) {
            return Err(format!("relay rejected {}", message.to).into());
        }

        let mut content = Vec::new();
        attachment.read_to_end(&mut content)?;

        self.sent.push(SentMail {
            from: message.from.to_string(),
            to: message.to.to_string(),
            subject: message.subject.to_string(),
            body: message.body.to_string(),
            attachment_name: message.attachment_name.to_string(),
            attachment_type: message.attachment_type.to_string(),
            attachment: content,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_zip() {
        let zip_data = create_test_zip(vec![("file.txt", b"hello")]);
        assert!(!zip_data.is_empty());
    }

    #[test]
    fn test_zip_builder() {
        let zip_data = ZipTestBuilder::new()
            .add_file("file.txt", b"content")
            .add_directory("dir/")
            .build();
        assert!(!zip_data.is_empty());
    }

    #[test]
    fn test_recording_transport_fails_on_attempt() {
        let message = OutgoingMessage {
            from: "f@x.com",
            to: "t@x.com",
            subject: "s",
            body: "b",
            attachment_name: "a.pdf",
            attachment_type: "application/pdf",
        };
        let mut transport = RecordingTransport::failing_on(2);

        transport.send(&message, &mut &b"one"[..]).unwrap();
        assert!(transport.send(&message, &mut &b"two"[..]).is_err());
        assert_eq!(transport.attempts.len(), 2);
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(transport.sent[0].attachment, b"one");
    }
}
