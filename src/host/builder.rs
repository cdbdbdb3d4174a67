use crate::domain::BuildError;
use crate::host::Config;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BuilderKind {
    Html,
    Latex,
}

impl BuilderKind {
    pub fn name(self) -> &'static str {
        match self {
            BuilderKind::Html => "html",
            BuilderKind::Latex => "latex",
        }
    }

    /// MIME types of images the output can embed.
    pub fn supported_image_types(self) -> &'static [&'static str] {
        match self {
            BuilderKind::Html => &["image/svg+xml", "image/png", "image/gif", "image/jpeg"],
            BuilderKind::Latex => &["application/pdf", "image/png", "image/jpeg"],
        }
    }

    pub fn out_suffix(self) -> &'static str {
        match self {
            BuilderKind::Html => "html",
            BuilderKind::Latex => "tex",
        }
    }
}

/// The active output builder.
#[derive(Debug, Clone)]
pub struct Builder {
    kind: BuilderKind,
    outdir: PathBuf,
    imgpath: Option<String>,
}

impl Builder {
    /// Creates `outdir` and resolves it to an absolute path.
    pub fn new(kind: BuilderKind, outdir: &Path, config: &Config) -> Result<Self, BuildError> {
        std::fs::create_dir_all(outdir).map_err(|e| BuildError::io(outdir, e))?;
        let outdir = outdir
            .canonicalize()
            .map_err(|e| BuildError::io(outdir, e))?;

        let imgpath = match kind {
            BuilderKind::Html => config
                .typed::<String>("imgpath")?
                .map(|path| path.trim_matches('/').to_string())
                .filter(|path| !path.is_empty() && path != "."),
            BuilderKind::Latex => None,
        };

        Ok(Self {
            kind,
            outdir,
            imgpath,
        })
    }

    pub fn kind(&self) -> BuilderKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    pub fn supported_image_types(&self) -> &'static [&'static str] {
        self.kind.supported_image_types()
    }

    /// Where images are written.
    pub fn image_dir(&self) -> PathBuf {
        match &self.imgpath {
            Some(imgpath) => self.outdir.join(imgpath),
            None => self.outdir.clone(),
        }
    }

    /// The image directory as seen from the page built for `docname`.
    pub fn relative_imgpath(&self, docname: &str) -> String {
        let up = relative_root(docname);
        match &self.imgpath {
            Some(imgpath) => format!("{up}{imgpath}"),
            None if up.is_empty() => ".".to_string(),
            None => up.trim_end_matches('/').to_string(),
        }
    }

    pub fn output_path(&self, docname: &str) -> PathBuf {
        self.outdir
            .join(format!("{docname}.{}", self.kind.out_suffix()))
    }
}

/// `../` once per directory level of `docname`.
pub fn relative_root(docname: &str) -> String {
    "../".repeat(docname.matches('/').count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config(imgpath: Option<&str>) -> Config {
        let mut registered = BTreeMap::new();
        registered.insert("imgpath".to_string(), imgpath.map(toml::Value::from));
        Config::resolve(toml::Table::new(), &registered)
    }

    #[test]
    fn test_html_images_go_to_imgpath() {
        let dir = tempfile::tempdir().unwrap();
        let builder = Builder::new(BuilderKind::Html, dir.path(), &config(Some("_images"))).unwrap();

        assert!(builder.outdir().is_absolute());
        assert_eq!(builder.image_dir(), builder.outdir().join("_images"));
        assert_eq!(builder.relative_imgpath("index"), "_images");
        assert_eq!(builder.relative_imgpath("guide/intro"), "../_images");
        assert_eq!(builder.output_path("guide/intro"), builder.outdir().join("guide/intro.html"));
    }

    #[test]
    fn test_empty_imgpath_falls_back_to_root() {
        let dir = tempfile::tempdir().unwrap();
        for imgpath in [Some(""), None] {
            let builder = Builder::new(BuilderKind::Html, dir.path(), &config(imgpath)).unwrap();
            assert_eq!(builder.image_dir(), builder.outdir());
            assert_eq!(builder.relative_imgpath("index"), ".");
            assert_eq!(builder.relative_imgpath("a/b/c"), "../..");
        }
    }

    #[test]
    fn test_latex_writes_images_to_outdir() {
        let dir = tempfile::tempdir().unwrap();
        let builder = Builder::new(BuilderKind::Latex, dir.path(), &config(Some("_images"))).unwrap();
        assert_eq!(builder.image_dir(), builder.outdir());
        assert_eq!(builder.output_path("index"), builder.outdir().join("index.tex"));
    }
}
