//! Error conversion utilities for CLI.
//!
//! Converts ziprelay-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use ziprelay_core::RelayError;

/// Converts `RelayError` to user-friendly anyhow error with context
pub fn convert_relay_error(err: RelayError, input: &Path) -> anyhow::Error {
    match err {
        RelayError::NotAZipArchive { detected } => {
            anyhow!(
                "File '{}' is not a ZIP archive (detected {detected})\n\
                 HINT: Only ZIP uploads can be inspected.",
                input.display()
            )
        }
        RelayError::MalformedArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be truncated, or --declared-size does not match the file.",
                input.display()
            )
        }
        RelayError::NoFilesProvided => anyhow!("No files to bundle into '{}'", input.display()),
        RelayError::NoFileProvided => anyhow!("No file to attach"),
        RelayError::NoRecipients => {
            anyhow!(
                "No recipients for '{}'\n\
                 HINT: Pass addresses with --to a@example.com,b@example.com.",
                input.display()
            )
        }
        RelayError::InvalidMimeType { file, content_type } => {
            anyhow!(
                "File '{file}' has a content type that is not allowed: {content_type:?}\n\
                 HINT: Declare the type explicitly with FILE=TYPE or --content-type if the guess is wrong."
            )
        }
        RelayError::ArchiveWriteFailure { file, reason } => {
            anyhow!(
                "Failed to bundle '{file}' into '{}': {reason}",
                input.display()
            )
        }
        RelayError::SendFailure {
            recipient,
            delivered,
            source,
        } => {
            anyhow!(
                "Failed to send '{}' to {recipient}: {source}\n\
                 Already delivered to: {}\n\
                 HINT: Later recipients were not attempted. Re-run with the remaining addresses.",
                input.display(),
                delivered_list(&delivered)
            )
        }
        RelayError::RewindFailure {
            recipient,
            delivered,
            source,
        } => {
            anyhow!(
                "Failed to re-read '{}' before sending to {recipient}: {source}\n\
                 Already delivered to: {}\n\
                 HINT: Later recipients were not attempted. Re-run with the remaining addresses.",
                input.display(),
                delivered_list(&delivered)
            )
        }
        RelayError::Io(io_err) => {
            anyhow!("I/O error while processing '{}': {io_err}", input.display())
        }
    }
}

fn delivered_list(delivered: &[String]) -> String {
    if delivered.is_empty() {
        "nobody".to_string()
    } else {
        delivered.join(", ")
    }
}

/// Adds context to a core error about the processed file
pub fn add_relay_context<T>(result: Result<T, RelayError>, input: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_relay_error(e, input))
}
