//! Infrastructure layer (adapters/implementations).
//!
//! Process and file-format integrations: the external `mscgen` renderer and
//! the optional SVG to PDF converter.

pub mod convert;
pub mod mscgen;
