//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use ziprelay_core::ArchiveInfo;
use ziprelay_core::Bundle;
use ziprelay_core::DispatchReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive inspection result
    fn format_archive_info(&self, info: &ArchiveInfo) -> Result<()>;

    /// Format bundling result
    fn format_bundle_result(&self, output_path: &Path, bundle: &Bundle) -> Result<()>;

    /// Format mail dispatch result
    fn format_dispatch_report(
        &self,
        attachment: &Path,
        report: &DispatchReport,
        dry_run: bool,
    ) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
        }
    }

    pub fn warning(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Warning,
            data: Some(data),
        }
    }
}
