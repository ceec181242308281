//! Format detection.

pub mod detect;

pub use detect::SniffedType;
pub use detect::sniff_content_type;
