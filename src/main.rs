//! mscgen-embed CLI entry point.
//!
//! Builds a directory of Markdown documents to HTML or LaTeX, rendering
//! embedded mscgen charts on the way.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use mscgen_embed::host::config::parse_override;
use mscgen_embed::host::{App, BuildOptions, BuilderKind, build};
use mscgen_embed::mscgen::MscgenExtension;

#[derive(Parser, Debug)]
#[command(name = "mscgen-embed")]
#[command(version)]
#[command(about = "Build Markdown docs with embedded mscgen charts", long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = BuilderKind::Html)]
    builder: BuilderKind,

    /// Configuration file (default: <SOURCEDIR>/conf.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override a configuration value
    #[arg(short = 'D', value_name = "NAME=VALUE")]
    define: Vec<String>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Directory containing the Markdown sources
    sourcedir: PathBuf,

    /// Directory the output is written to
    outdir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut app = App::new();
    app.setup_extension(&MscgenExtension);

    let overrides = args
        .define
        .iter()
        .map(|arg| parse_override(arg))
        .collect::<Result<Vec<_>, _>>()?;

    let options = BuildOptions {
        srcdir: args.sourcedir.clone(),
        outdir: args.outdir.clone(),
        builder: args.builder,
        config_file: args.config,
        overrides,
    };

    let report = build(&app, &options)
        .with_context(|| format!("Failed to build {}", args.sourcedir.display()))?;

    log::info!(
        "build succeeded, {} {} page(s) in {}",
        report.outputs.len(),
        args.builder.name(),
        args.outdir.display()
    );
    Ok(())
}
