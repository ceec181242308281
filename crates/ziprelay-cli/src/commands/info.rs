//! Info command implementation.

use super::display_name;
use crate::cli::InfoArgs;
use crate::error::add_relay_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::fs::File;
use std::io::BufReader;
use ziprelay_core::inspect_archive;

pub fn execute(args: &InfoArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let file = File::open(&args.archive)
        .with_context(|| format!("failed to open '{}'", args.archive.display()))?;

    let declared_size = match args.declared_size {
        Some(size) => size,
        None => file
            .metadata()
            .with_context(|| format!("failed to stat '{}'", args.archive.display()))?
            .len(),
    };

    let info = add_relay_context(
        inspect_archive(
            &display_name(&args.archive),
            BufReader::new(file),
            declared_size,
        ),
        &args.archive,
    )?;

    formatter.format_archive_info(&info)
}
