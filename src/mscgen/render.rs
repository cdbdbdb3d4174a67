use crate::domain::{
    BuildError, Capabilities, ImageFormat, MscgenError, OutputType, determine_format,
};
use crate::host::Config;
use crate::infra::{self, convert};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const FILE_PREFIX: &str = "mscgen";

/// Renderer settings, read once when a build starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MscgenConfig {
    pub executable: String,
    pub args: Vec<String>,
    /// Client-side renderer script. When set, HTML output embeds charts as scripts.
    pub js: Option<String>,
}

impl Default for MscgenConfig {
    fn default() -> Self {
        Self {
            executable: "mscgen".to_string(),
            args: Vec::new(),
            js: None,
        }
    }
}

impl MscgenConfig {
    pub fn from_config(config: &Config) -> Result<Self, BuildError> {
        let defaults = Self::default();
        Ok(Self {
            executable: config
                .typed::<String>("mscgen")?
                .unwrap_or(defaults.executable),
            args: config
                .typed::<Vec<String>>("mscgen_args")?
                .unwrap_or(defaults.args),
            js: config.typed::<String>("mscgen_js")?,
        })
    }
}

/// An image written for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub basename: String,
    pub format: ImageFormat,
    pub path: PathBuf,
}

impl RenderedFile {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Per-build rendering state shared by the node handlers.
#[derive(Debug, Clone)]
pub struct MscgenRenderer {
    config: MscgenConfig,
    capabilities: Capabilities,
}

impl MscgenRenderer {
    pub fn new(config: MscgenConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
        }
    }

    pub fn config(&self) -> &MscgenConfig {
        &self.config
    }

    pub fn render_native(&self, code: &str, output: OutputType) -> Result<Vec<u8>, MscgenError> {
        infra::mscgen::render_native(&self.config.executable, &self.config.args, code, output)
    }

    /// Renders `code` into `outdir` using the best format in `supported`.
    ///
    /// Fails before touching the filesystem when no format is acceptable.
    pub fn render_msc(
        &self,
        code: &str,
        outdir: &Path,
        supported: &[&str],
    ) -> Result<RenderedFile, MscgenError> {
        let format = determine_format(supported, self.capabilities).ok_or_else(|| {
            MscgenError::NoSuitableFormat {
                supported: supported.iter().map(|s| s.to_string()).collect(),
            }
        })?;

        std::fs::create_dir_all(outdir)?;

        let basename = format!("{FILE_PREFIX}-{}", Uuid::new_v4());
        let path = outdir.join(format!("{basename}.{}", format.extension()));

        let image = self.render_native(code, format.output_type())?;
        match format {
            // PNG and SVG can be written directly
            ImageFormat::Png | ImageFormat::Svg => std::fs::write(&path, image)?,
            ImageFormat::Pdf => convert::svg_to_pdf(&image, &path)?,
        }
        log::info!("wrote mscgen chart {}", path.display());

        Ok(RenderedFile {
            basename,
            format,
            path,
        })
    }
}
