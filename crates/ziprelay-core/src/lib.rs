//! ZIP inspection, bundling and attachment mailing.
//!
//! `ziprelay-core` provides three operations over uploaded files:
//!
//! - [`inspect_archive`] lists the files inside a ZIP archive with sizes and
//!   guessed content types.
//! - [`bundle_files`] packs a set of files into a new `archive.zip` after
//!   checking their declared content types.
//! - [`dispatch_mail`] sends one file as an attachment to a list of
//!   recipients, one message each.
//!
//! # Examples
//!
//! ```no_run
//! use std::fs::File;
//! use ziprelay_core::inspect_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("upload.zip")?;
//! let size = file.metadata()?.len();
//! let info = inspect_archive("upload.zip", file, size)?;
//! println!("{} files, {} bytes", info.total_files, info.total_size);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bundle;
pub mod config;
pub mod error;
pub mod formats;
pub mod inspection;
pub mod io;
pub mod mail;
pub mod report;

#[doc(hidden)]
pub mod test_utils;

pub use bundle::BundleInput;
pub use bundle::bundle_files;
pub use config::AllowList;
pub use config::BundleConfig;
pub use config::MailConfig;
pub use error::RelayError;
pub use error::Result;
pub use error::TransportError;
pub use inspection::inspect_archive;
pub use mail::MailAttachment;
pub use mail::MailTransport;
pub use mail::OutgoingMessage;
pub use mail::Recipients;
pub use mail::dispatch_mail;
pub use mail::dispatch_mail_with_progress;
pub use report::ArchiveInfo;
pub use report::Bundle;
pub use report::DispatchProgress;
pub use report::DispatchReport;
pub use report::FileInfo;
pub use report::NoopProgress;
