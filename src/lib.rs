//! Build Markdown documentation with embedded mscgen message sequence charts.

pub mod domain;
pub mod host;
pub mod infra;
pub mod mscgen;
