//! Archive inspection without extraction.
//!
//! Sniffs an uploaded stream for a ZIP signature, walks the central
//! directory and reports per-entry and aggregate metadata.
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
//!
//! let info = inspect_archive("upload.zip", file, size)?;
//! println!("Archive contains {} files", info.total_files);
//! # Ok(())
//! # }
//! ```

pub mod inspect;

pub use inspect::flatten_entry_path;
pub use inspect::guess_mimetype;
pub use inspect::inspect_archive;
pub use inspect::is_hidden;
