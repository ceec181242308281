//! Mail command implementation.

use super::display_name;
use super::guess_content_type;
use crate::cli::MailArgs;
use crate::error::add_relay_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::smtp::DryRunTransport;
use crate::smtp::SmtpMailer;
use crate::smtp::SmtpSettings;
use anyhow::Context;
use anyhow::Result;
use std::fs::File;
use std::io::BufReader;
use ziprelay_core::MailAttachment;
use ziprelay_core::MailConfig;
use ziprelay_core::MailTransport;
use ziprelay_core::NoopProgress;
use ziprelay_core::Recipients;
use ziprelay_core::dispatch_mail_with_progress;

/// Sender used by `--dry-run` when no address is configured.
const DRY_RUN_SENDER: &str = "ziprelay@localhost";

pub fn execute(args: &MailArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let file = File::open(&args.file)
        .with_context(|| format!("failed to open '{}'", args.file.display()))?;
    let content_type = args
        .content_type
        .clone()
        .unwrap_or_else(|| guess_content_type(&args.file));
    let attachment = MailAttachment::new(display_name(&args.file), content_type, BufReader::new(file));

    let recipients = Recipients::from_list(args.to.iter().flat_map(|list| list.split(',')));

    let sender = match (&args.from, args.dry_run) {
        (Some(from), _) => from.clone(),
        (None, true) => DRY_RUN_SENDER.to_string(),
        (None, false) => anyhow::bail!(
            "No sender address configured\n\
             HINT: Use --from or set ZIPRELAY_MAIL_FROM."
        ),
    };
    let config = MailConfig::new(sender);

    let mut transport: Box<dyn MailTransport> = if args.dry_run {
        Box::new(DryRunTransport)
    } else {
        Box::new(SmtpMailer::new(&SmtpSettings {
            host: args.smtp_host.clone(),
            port: args.smtp_port,
            username: args.smtp_username.clone(),
            password: args.smtp_password.clone(),
        })?)
    };

    // Use progress bar if TTY is detected and output is not suppressed
    let result = if !quiet && recipients.len() > 1 && CliProgress::should_show() {
        let mut progress = CliProgress::new(recipients.len(), "Sending");
        dispatch_mail_with_progress(
            Some(attachment),
            &recipients,
            &config,
            transport.as_mut(),
            &mut progress,
        )
    } else {
        let mut noop = NoopProgress;
        dispatch_mail_with_progress(
            Some(attachment),
            &recipients,
            &config,
            transport.as_mut(),
            &mut noop,
        )
    };
    let report = add_relay_context(result, &args.file)?;

    formatter.format_dispatch_report(&args.file, &report, args.dry_run)
}
