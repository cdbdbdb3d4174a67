//! Error types for mscgen rendering and documentation builds.
//!
//! `MscgenError` covers everything that can go wrong while turning one chart
//! into an image. `BuildError` is the host-level failure a whole build reports;
//! a failing chart surfaces as `BuildError::Document` with the chart error as
//! its source.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by node handlers and build-start hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors related to rendering a single mscgen chart.
#[derive(Debug, Error)]
pub enum MscgenError {
    #[error("mscgen executable `{program}` not found: {source}")]
    RendererNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to run mscgen executable `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot render the following mscgen code:\n{code}\n\nError: {stderr}")]
    Renderer { code: String, stderr: String },

    #[error("character {ch:?} at byte {offset} cannot be encoded as ISO-8859-1")]
    Encoding { ch: char, offset: usize },

    #[error("no supported image format for mscgen output (builder supports: {})", .supported.join(", "))]
    NoSuitableFormat { supported: Vec<String> },

    #[error("SVG to PDF conversion failed: {0}")]
    Conversion(String),

    #[error("cannot include {} in LaTeX output: {ch:?} is not allowed in graphics paths", .path.display())]
    LatexPath { path: PathBuf, ch: char },

    #[error("mscgen extension was not initialised for this build")]
    NotInitialized,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors reported by a documentation build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value `{name}`: {source}")]
    ConfigValue {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid override `{0}`, expected NAME=VALUE")]
    InvalidOverride(String),

    #[error("failed to walk source directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("build-start hook failed")]
    Hook(#[source] BoxError),

    #[error("no {builder} handler registered for node `{node}`")]
    UnhandledNode { node: String, builder: &'static str },

    #[error("error while building document `{docname}`")]
    Document {
        docname: String,
        #[source]
        source: BoxError,
    },

    #[error("template registration failed: {0}")]
    TemplateRegistration(#[from] handlebars::TemplateError),

    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}
