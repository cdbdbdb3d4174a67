//! Domain types shared by the host builder and the mscgen extension.

pub mod error;
pub mod format;

pub use error::*;
pub use format::*;
