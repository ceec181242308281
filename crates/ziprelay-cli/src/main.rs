//! Ziprelay CLI - Command-line utility for inspecting ZIP archives, bundling
//! files and mailing attachments.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;
mod smtp;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose, cli.quiet);
    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Info(args) => commands::info::execute(args, &*formatter),
        cli::Commands::Bundle(args) => commands::bundle::execute(args, &*formatter),
        cli::Commands::Mail(args) => commands::mail::execute(args, &*formatter, cli.quiet),
    }
}
