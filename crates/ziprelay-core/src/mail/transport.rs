//! Mail transport seam.

use std::io::Read;

use crate::error::TransportError;

/// A single message addressed to a single recipient.
///
/// The dispatcher builds one template per dispatch and only swaps `to`
/// between sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingMessage<'a> {
    /// Sender address.
    pub from: &'a str,
    /// Sole recipient address.
    pub to: &'a str,
    /// Subject line.
    pub subject: &'a str,
    /// Plain-text body.
    pub body: &'a str,
    /// Attachment file name.
    pub attachment_name: &'a str,
    /// Declared attachment content type.
    pub attachment_type: &'a str,
}

/// Sends one message to one address.
///
/// `attachment` is positioned at the start of the attachment content and
/// may be consumed completely; the dispatcher rewinds it before the next
/// send. Implementations must not retry on their own.
pub trait MailTransport {
    /// Delivers `message` with the attachment content read from `attachment`.
    fn send(
        &mut self,
        message: &OutgoingMessage<'_>,
        attachment: &mut dyn Read,
    ) -> Result<(), TransportError>;
}
