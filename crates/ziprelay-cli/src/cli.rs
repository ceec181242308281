//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ziprelay")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the files inside a ZIP archive
    Info(InfoArgs),
    /// Bundle files into a new ZIP archive
    Bundle(BundleArgs),
    /// Mail a file as an attachment to a list of recipients
    Mail(MailArgs),
}

#[derive(clap::Args)]
pub struct InfoArgs {
    /// Path to the ZIP archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Archive length to assume when reading the central directory
    /// (default: the file's length)
    #[arg(long, value_name = "SIZE", value_parser = parse_byte_size)]
    pub declared_size: Option<u64>,
}

#[derive(clap::Args)]
pub struct BundleArgs {
    /// Output archive file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Files to bundle, optionally with a declared content type
    /// (e.g. photo.jpg=image/jpeg)
    #[arg(value_name = "FILE[=CONTENT_TYPE]", required = true, value_parser = parse_file_spec)]
    pub files: Vec<FileSpec>,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct MailArgs {
    /// File to attach
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Comma-separated recipient addresses (can be repeated)
    #[arg(long, value_name = "ADDRESSES")]
    pub to: Vec<String>,

    /// Declared content type of the attachment (default: guessed from the
    /// file extension)
    #[arg(long, value_name = "TYPE")]
    pub content_type: Option<String>,

    /// Sender address
    #[arg(long, value_name = "ADDRESS", env = "ZIPRELAY_MAIL_FROM")]
    pub from: Option<String>,

    /// SMTP relay host
    #[arg(long, env = "ZIPRELAY_SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP relay port
    #[arg(long, env = "ZIPRELAY_SMTP_PORT", default_value = "587")]
    pub smtp_port: u16,

    /// SMTP user name
    #[arg(long, env = "ZIPRELAY_SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "ZIPRELAY_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Log each message instead of connecting to the SMTP relay
    #[arg(long)]
    pub dry_run: bool,
}

/// A file argument with an optional declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content_type: Option<String>,
}

/// Parse `PATH` or `PATH=TYPE/SUBTYPE`.
///
/// The split happens at the last `=` and only when the right-hand side is a
/// `type/subtype` with a registered top-level type, so paths containing `=`
/// still work.
fn parse_file_spec(s: &str) -> Result<FileSpec, String> {
    if s.is_empty() {
        return Err("empty file argument".to_string());
    }

    if let Some((path, content_type)) = s.rsplit_once('=')
        && !path.is_empty()
        && looks_like_content_type(content_type)
    {
        return Ok(FileSpec {
            path: PathBuf::from(path),
            content_type: Some(content_type.to_string()),
        });
    }

    Ok(FileSpec {
        path: PathBuf::from(s),
        content_type: None,
    })
}

/// Registered top-level media types.
const MEDIA_TYPES: [&str; 9] = [
    "application",
    "audio",
    "font",
    "image",
    "message",
    "model",
    "multipart",
    "text",
    "video",
];

fn looks_like_content_type(s: &str) -> bool {
    let essence = s.split(';').next().unwrap_or_default().trim();
    essence.split_once('/').is_some_and(|(kind, sub)| {
        MEDIA_TYPES.iter().any(|t| t.eq_ignore_ascii_case(kind))
            && !sub.is_empty()
            && !sub.contains('/')
    })
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
