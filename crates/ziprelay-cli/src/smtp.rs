//! Mail transports used by the `mail` command.

use anyhow::Context;
use lettre::Message;
use lettre::SmtpTransport;
use lettre::Transport;
use lettre::message::Attachment;
use lettre::message::Mailbox;
use lettre::message::MultiPart;
use lettre::message::SinglePart;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use std::io::Read;
use tracing::debug;
use tracing::info;
use ziprelay_core::MailTransport;
use ziprelay_core::OutgoingMessage;
use ziprelay_core::TransportError;

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Sends messages through an SMTP relay with STARTTLS.
///
/// A connection is opened per message.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> anyhow::Result<Self> {
        let mut builder = SmtpTransport::starttls_relay(&settings.host)
            .with_context(|| format!("invalid SMTP relay host '{}'", settings.host))?
            .port(settings.port);

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        debug!(
            op = "smtp.configure",
            host = settings.host.as_str(),
            port = settings.port,
            authenticated = settings.username.is_some(),
            "SMTP relay configured"
        );

        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl MailTransport for SmtpMailer {
    fn send(
        &mut self,
        message: &OutgoingMessage<'_>,
        attachment: &mut dyn Read,
    ) -> Result<(), TransportError> {
        let email = build_message(message, attachment)?;
        self.transport.send(&email)?;
        Ok(())
    }
}

/// Assembles a `multipart/mixed` message: plain-text body plus attachment.
fn build_message(
    message: &OutgoingMessage<'_>,
    attachment: &mut dyn Read,
) -> Result<Message, TransportError> {
    let mut content = Vec::new();
    attachment.read_to_end(&mut content)?;

    let email = Message::builder()
        .from(message.from.parse::<Mailbox>()?)
        .to(message.to.parse::<Mailbox>()?)
        .subject(message.subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(message.body.to_string()))
                .singlepart(
                    Attachment::new(message.attachment_name.to_string())
                        .body(content, ContentType::parse(message.attachment_type)?),
                ),
        )?;

    Ok(email)
}

/// Transport for `--dry-run`: builds each message, then logs it.
///
/// Addresses and the content type are validated exactly as for a real send,
/// so a dry run stops at the same recipient an SMTP send would reject
/// locally.
#[derive(Debug, Default)]
pub struct DryRunTransport;

impl MailTransport for DryRunTransport {
    fn send(
        &mut self,
        message: &OutgoingMessage<'_>,
        attachment: &mut dyn Read,
    ) -> Result<(), TransportError> {
        let email = build_message(message, attachment)?;
        let size = email.formatted().len();

        info!(
            op = "mail.dry_run",
            from = message.from,
            to = message.to,
            subject = message.subject,
            attachment = message.attachment_name,
            message_bytes = size,
            "dry run, message not sent"
        );
        Ok(())
    }
}
