//! I/O wrappers shared by the inspector and the dispatcher.

pub mod counting;
pub mod declared;

pub use counting::CountingReader;
pub use declared::DeclaredLength;
