//! Bundle command implementation.

use super::display_name;
use super::guess_content_type;
use crate::cli::BundleArgs;
use crate::error::add_relay_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use tracing::debug;
use ziprelay_core::BundleConfig;
use ziprelay_core::BundleInput;
use ziprelay_core::bundle_files;

pub fn execute(args: &BundleArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if args.output.exists() {
        if !args.force {
            bail!(
                "Output file '{}' already exists\n\
                 HINT: Use --force to overwrite.",
                args.output.display()
            );
        }
        formatter.format_warning(&format!("Overwriting '{}'", args.output.display()));
    }

    let inputs = args
        .files
        .iter()
        .map(|spec| {
            let file = File::open(&spec.path)
                .with_context(|| format!("failed to open '{}'", spec.path.display()))?;
            let content_type = spec
                .content_type
                .clone()
                .unwrap_or_else(|| guess_content_type(&spec.path));
            debug!(
                op = "bundle.input",
                path = %spec.path.display(),
                content_type = content_type.as_str(),
                "queued file"
            );
            Ok(BundleInput::new(
                display_name(&spec.path),
                content_type,
                BufReader::new(file),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let bundle = add_relay_context(
        bundle_files(inputs, &BundleConfig::default()),
        &args.output,
    )?;

    fs::write(&args.output, &bundle.bytes)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    formatter.format_bundle_result(&args.output, &bundle)
}
