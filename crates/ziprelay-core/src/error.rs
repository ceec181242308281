//! Error types for inspection, bundling and mail dispatch.

use thiserror::Error;

/// Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Error returned by a [`MailTransport`](crate::mail::MailTransport).
///
/// Transports are opaque to the dispatcher, so the cause is boxed and only
/// carried along inside [`RelayError::SendFailure`].
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while inspecting, bundling or mailing files.
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O operation on an input stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input does not start with a ZIP signature.
    #[error("file is not zip-archive (detected {detected})")]
    NotAZipArchive {
        /// Content type the sniffer reported instead.
        detected: &'static str,
    },

    /// The central directory could not be parsed with the declared size.
    #[error("malformed archive: {0}")]
    MalformedArchive(String),

    /// A bundle was requested with an empty file list.
    #[error("no files provided")]
    NoFilesProvided,

    /// A mail dispatch was requested without an attachment.
    #[error("no file provided")]
    NoFileProvided,

    /// The recipient list is empty or only holds blank entries.
    #[error("no recipients provided")]
    NoRecipients,

    /// A declared content type is not on the operation's allow-list.
    #[error("invalid MIME type for file {file}: {content_type:?}")]
    InvalidMimeType {
        /// Name of the offending file.
        file: String,
        /// Content type the caller declared for it.
        content_type: String,
    },

    /// Writing an entry into the output archive failed.
    #[error("failed to write {file} into archive: {reason}")]
    ArchiveWriteFailure {
        /// Entry being written, or `archive.zip` when finishing the container.
        file: String,
        /// Underlying failure.
        reason: String,
    },

    /// The transport refused or failed to deliver to one recipient.
    ///
    /// Recipients listed in `delivered` already received the message; the
    /// rest were never attempted.
    #[error("failed to send mail to {recipient}: {source}")]
    SendFailure {
        /// Recipient whose send failed.
        recipient: String,
        /// Recipients that were sent to before the failure, in order.
        delivered: Vec<String>,
        /// Transport error.
        #[source]
        source: TransportError,
    },

    /// The attachment could not be rewound before sending to `recipient`.
    ///
    /// Nothing was sent to `recipient`; those listed in `delivered` already
    /// received the message.
    #[error("failed to rewind attachment for {recipient}: {source}")]
    RewindFailure {
        /// Recipient whose send was not attempted.
        recipient: String,
        /// Recipients that were sent to before the failure, in order.
        delivered: Vec<String>,
        /// Seek error.
        #[source]
        source: std::io::Error,
    },
}

impl RelayError {
    /// Returns `true` if this error is a caller mistake detected before any
    /// side effect took place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziprelay_core::RelayError;
    ///
    /// assert!(RelayError::NoRecipients.is_input_error());
    /// assert!(!RelayError::Io(std::io::Error::other("boom")).is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NotAZipArchive { .. }
                | Self::MalformedArchive(_)
                | Self::NoFilesProvided
                | Self::NoFileProvided
                | Self::NoRecipients
                | Self::InvalidMimeType { .. }
        )
    }

    /// Returns `true` if the operation failed partway through.
    ///
    /// Bundling discards everything on such a failure. Mail dispatch may
    /// already have delivered to some recipients, see
    /// [`delivered`](Self::delivered).
    #[must_use]
    pub const fn is_resource_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_)
                | Self::ArchiveWriteFailure { .. }
                | Self::SendFailure { .. }
                | Self::RewindFailure { .. }
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziprelay_core::RelayError;
    ///
    /// let err = RelayError::MalformedArchive("bad directory".to_string());
    /// assert_eq!(err.context(), Some("bad directory"));
    ///
    /// assert_eq!(RelayError::NoFilesProvided.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::MalformedArchive(msg) => Some(msg),
            Self::ArchiveWriteFailure { reason, .. } => Some(reason),
            Self::InvalidMimeType { file, .. } => Some(file),
            Self::SendFailure { recipient, .. } | Self::RewindFailure { recipient, .. } => {
                Some(recipient)
            }
            _ => None,
        }
    }

    /// Recipients that received the mail before a
    /// [`SendFailure`](Self::SendFailure) or [`RewindFailure`](Self::RewindFailure).
    #[must_use]
    pub fn delivered(&self) -> &[String] {
        match self {
            Self::SendFailure { delivered, .. } | Self::RewindFailure { delivered, .. } => {
                delivered
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RelayError::NoFilesProvided;
        assert_eq!(err.to_string(), "no files provided");

        let err = RelayError::NotAZipArchive {
            detected: "text/plain",
        };
        assert!(err.to_string().contains("not zip-archive"));
        assert!(err.to_string().contains("text/plain"));
    }

    #[test]
    fn test_invalid_mime_type_names_file() {
        let err = RelayError::InvalidMimeType {
            file: "b.txt".into(),
            content_type: "text/plain".into(),
        };
        let display = err.to_string();
        assert!(display.contains("b.txt"));
        assert!(display.contains("text/plain"));
        assert!(err.is_input_error());
        assert_eq!(err.context(), Some("b.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RelayError = io_err.into();
        assert!(matches!(err, RelayError::Io(_)));
        assert!(err.is_resource_error());
    }

    #[test]
    fn test_classification_is_disjoint() {
        let errors = [
            RelayError::NotAZipArchive {
                detected: "application/octet-stream",
            },
            RelayError::MalformedArchive("x".into()),
            RelayError::NoFilesProvided,
            RelayError::NoFileProvided,
            RelayError::NoRecipients,
            RelayError::ArchiveWriteFailure {
                file: "a.png".into(),
                reason: "disk".into(),
            },
            RelayError::SendFailure {
                recipient: "a@example.com".into(),
                delivered: vec![],
                source: "refused".into(),
            },
            RelayError::RewindFailure {
                recipient: "b@example.com".into(),
                delivered: vec!["a@example.com".into()],
                source: std::io::Error::other("seek"),
            },
        ];
        for err in &errors {
            assert_ne!(err.is_input_error(), err.is_resource_error(), "{err}");
        }
    }

    #[test]
    fn test_send_failure_source_chain() {
        use std::error::Error;

        let err = RelayError::SendFailure {
            recipient: "b@example.com".into(),
            delivered: vec!["a@example.com".into()],
            source: "connection reset".into(),
        };
        assert_eq!(err.delivered(), ["a@example.com".to_string()]);
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("connection reset")
        );
        assert!(err.to_string().contains("b@example.com"));
    }

    #[test]
    fn test_rewind_failure_keeps_delivered() {
        let err = RelayError::RewindFailure {
            recipient: "c@example.com".into(),
            delivered: vec!["a@example.com".into(), "b@example.com".into()],
            source: std::io::Error::other("stale handle"),
        };
        assert_eq!(err.delivered(), ["a@example.com", "b@example.com"]);
        assert_eq!(err.context(), Some("c@example.com"));
        assert!(err.to_string().contains("stale handle"));
    }

    #[test]
    fn test_delivered_empty_for_other_errors() {
        assert!(RelayError::NoRecipients.delivered().is_empty());
    }
}
