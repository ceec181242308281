//! Attachment mail dispatch.
//!
//! Sends one uploaded file to each address of a recipient list, one message
//! per recipient, strictly in list order. The attachment is replayed from
//! offset 0 for every send. The first transport failure stops the dispatch.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use ziprelay_core::MailAttachment;
//! use ziprelay_core::MailConfig;
//! use ziprelay_core::Recipients;
//! use ziprelay_core::dispatch_mail;
//! use ziprelay_core::test_utils::RecordingTransport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let attachment = MailAttachment::new(
//!     "report.pdf",
//!     "application/pdf",
//!     Cursor::new(b"%PDF-1.7".to_vec()),
//! );
//! let recipients = Recipients::parse("a@example.com,b@example.com");
//! let config = MailConfig::new("noreply@example.com");
//! let mut transport = RecordingTransport::default();
//!
//! let report = dispatch_mail(Some(attachment), &recipients, &config, &mut transport)?;
//! assert_eq!(report.delivered, ["a@example.com", "b@example.com"]);
//! # Ok(())
//! # }
//! ```

pub mod recipients;
pub mod transport;

pub use recipients::Recipients;
pub use transport::MailTransport;
pub use transport::OutgoingMessage;

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::time::Instant;

use tracing::info;
use tracing::warn;

use crate::RelayError;
use crate::Result;
use crate::config::MailConfig;
use crate::io::CountingReader;
use crate::report::DispatchProgress;
use crate::report::DispatchReport;
use crate::report::NoopProgress;

/// The file to send.
#[derive(Debug)]
pub struct MailAttachment<R> {
    /// File name shown to recipients.
    pub file_name: String,

    /// Content type declared by the caller.
    pub content_type: String,

    /// Attachment content. Must be rewindable.
    pub reader: R,
}

impl<R> MailAttachment<R> {
    /// Creates an attachment.
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, reader: R) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            reader,
        }
    }
}

/// Sends `attachment` to every recipient.
///
/// See [`dispatch_mail_with_progress`] for details.
pub fn dispatch_mail<R: Read + Seek>(
    attachment: Option<MailAttachment<R>>,
    recipients: &Recipients,
    config: &MailConfig,
    transport: &mut dyn MailTransport,
) -> Result<DispatchReport> {
    let mut progress = NoopProgress;
    dispatch_mail_with_progress(attachment, recipients, config, transport, &mut progress)
}

/// Sends `attachment` to every recipient with progress reporting.
///
/// Validation happens before anything is sent. Each recipient then gets its
/// own message with the fixed subject and body from `config`; the attachment
/// reader is rewound to offset 0 before every send.
///
/// Delivery is fail-fast: the first transport error ends the dispatch and
/// later recipients are never attempted. Recipients already sent to are not
/// rolled back; they are listed in [`RelayError::delivered`]. A failed
/// rewind ends the dispatch the same way.
///
/// # Errors
///
/// - [`RelayError::NoFileProvided`] if `attachment` is `None`
/// - [`RelayError::NoRecipients`] if `recipients` is empty
/// - [`RelayError::InvalidMimeType`] if the declared type is not allowed
/// - [`RelayError::SendFailure`] on the first transport failure
/// - [`RelayError::RewindFailure`] if the attachment cannot be rewound
pub fn dispatch_mail_with_progress<R: Read + Seek>(
    attachment: Option<MailAttachment<R>>,
    recipients: &Recipients,
    config: &MailConfig,
    transport: &mut dyn MailTransport,
    progress: &mut dyn DispatchProgress,
) -> Result<DispatchReport> {
    let Some(mut attachment) = attachment else {
        return Err(RelayError::NoFileProvided);
    };

    if recipients.is_empty() {
        return Err(RelayError::NoRecipients);
    }

    if !config.allowed_types.permits(&attachment.content_type) {
        return Err(RelayError::InvalidMimeType {
            file: attachment.file_name,
            content_type: attachment.content_type,
        });
    }

    let start = Instant::now();
    let template = OutgoingMessage {
        from: &config.sender,
        to: "",
        subject: &config.subject,
        body: &config.body,
        attachment_name: &attachment.file_name,
        attachment_type: &attachment.content_type,
    };

    let total = recipients.len();
    let mut report = DispatchReport::default();

    for (idx, recipient) in recipients.iter().enumerate() {
        progress.on_recipient_start(recipient, total, idx + 1);

        if let Err(source) = attachment.reader.seek(SeekFrom::Start(0)) {
            warn!(
                op = "mail.rewind_failed",
                recipient,
                delivered = report.delivered.len(),
                error = %source,
                "attachment rewind failed, remaining recipients skipped"
            );
            return Err(RelayError::RewindFailure {
                recipient: recipient.to_string(),
                delivered: report.delivered,
                source,
            });
        }
        let message = OutgoingMessage {
            to: recipient,
            ..template
        };
        let mut reader = CountingReader::new(&mut attachment.reader);

        if let Err(source) = transport.send(&message, &mut reader) {
            warn!(
                op = "mail.send_failed",
                recipient,
                delivered = report.delivered.len(),
                error = %source,
                "send failed, remaining recipients skipped"
            );
            return Err(RelayError::SendFailure {
                recipient: recipient.to_string(),
                delivered: report.delivered,
                source,
            });
        }

        if idx == 0 {
            report.attachment_size = reader.total_bytes();
        }
        info!(
            op = "mail.sent",
            recipient,
            current = idx + 1,
            total,
            "attachment sent"
        );
        report.delivered.push(recipient.to_string());
        progress.on_recipient_sent(recipient);
    }

    report.duration = start.elapsed();
    progress.on_complete();

    Ok(report)
}
