//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use ziprelay_core::ArchiveInfo;
use ziprelay_core::Bundle;
use ziprelay_core::DispatchReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct BundleOutput {
    output_path: String,
    archive_name: String,
    files_added: usize,
    bytes_read: u64,
    archive_size: u64,
    compression_ratio: f64,
    duration_ms: u128,
}

impl BundleOutput {
    fn new(output_path: &Path, bundle: &Bundle) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            archive_name: bundle.file_name.clone(),
            files_added: bundle.files_added,
            bytes_read: bundle.bytes_read,
            archive_size: bundle.archive_size(),
            compression_ratio: bundle.compression_ratio(),
            duration_ms: bundle.duration.as_millis(),
        }
    }
}

#[derive(Serialize)]
struct DispatchOutput<'a> {
    attachment: String,
    recipients_sent: usize,
    delivered: &'a [String],
    attachment_size: u64,
    dry_run: bool,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format_archive_info(&self, info: &ArchiveInfo) -> Result<()> {
        Self::output(&JsonOutput::success("info", info))
    }

    fn format_bundle_result(&self, output_path: &Path, bundle: &Bundle) -> Result<()> {
        let output = JsonOutput::success("bundle", BundleOutput::new(output_path, bundle));
        Self::output(&output)
    }

    fn format_dispatch_report(
        &self,
        attachment: &Path,
        report: &DispatchReport,
        dry_run: bool,
    ) -> Result<()> {
        let data = DispatchOutput {
            attachment: attachment.display().to_string(),
            recipients_sent: report.recipients_sent(),
            delivered: &report.delivered,
            attachment_size: report.attachment_size,
            dry_run,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("mail", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        // Warnings go to stderr so stdout stays a single result document
        let output = JsonOutput::warning(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        if let Ok(json) = serde_json::to_string(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}
