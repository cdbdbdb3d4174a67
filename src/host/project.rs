use crate::domain::BuildError;
use crate::host::builder::relative_root;
use crate::host::config::{self, CONFIG_FILE};
use crate::host::latex;
use crate::host::{
    App, Builder, BuilderKind, BuildStart, BuildState, Config, Document, Element, Node, Translator,
    Visit,
};
use handlebars::Handlebars;
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};

const HTML_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{docname}} &#8212; {{project}}</title>
{{#each scripts}}
<script src="{{this}}"></script>
{{/each}}
</head>
<body>
{{{body}}}
</body>
</html>
"#;

const LATEX_PAGE: &str = r#"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage{graphicx}
\usepackage{hyperref}
\newcommand{\sphinxincludegraphics}[2][]{\includegraphics[#1]{#2}}
{{{title}}}
\begin{document}
\maketitle
{{{body}}}
\end{document}
"#;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub srcdir: PathBuf,
    pub outdir: PathBuf,
    pub builder: BuilderKind,
    /// Defaults to `conf.toml` in `srcdir` when it exists.
    pub config_file: Option<PathBuf>,
    pub overrides: Vec<(String, toml::Value)>,
}

impl BuildOptions {
    pub fn new(srcdir: impl Into<PathBuf>, outdir: impl Into<PathBuf>, builder: BuilderKind) -> Self {
        Self {
            srcdir: srcdir.into(),
            outdir: outdir.into(),
            builder,
            config_file: None,
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, name: &str, value: impl Into<toml::Value>) -> Self {
        self.overrides.push((name.to_string(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub outputs: Vec<PathBuf>,
}

#[derive(Serialize)]
struct HtmlPage<'a> {
    docname: &'a str,
    project: &'a str,
    scripts: Vec<String>,
    body: String,
}

#[derive(Serialize)]
struct LatexPage {
    title: String,
    body: String,
}

/// Builds every Markdown document under `options.srcdir`.
///
/// Stops at the first document that fails; outputs written before that
/// point stay on disk.
pub fn build(app: &App, options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let mut user = match &options.config_file {
        Some(path) => config::load_file(path)?,
        None => {
            let default = options.srcdir.join(CONFIG_FILE);
            if default.is_file() {
                config::load_file(&default)?
            } else {
                toml::Table::new()
            }
        }
    };
    for (name, value) in &options.overrides {
        user.insert(name.clone(), value.clone());
    }
    let config = Config::resolve(user, app.config_values());

    let builder = Builder::new(options.builder, &options.outdir, &config)?;
    let mut state = BuildState::default();
    let mut script_files = Vec::new();
    app.emit_build_start(&mut BuildStart {
        config: &config,
        builder: &builder,
        state: &mut state,
        script_files: &mut script_files,
    })
    .map_err(BuildError::Hook)?;

    let project = config
        .typed::<String>("project")?
        .unwrap_or_default();

    let mut templates = Handlebars::new();
    templates.register_template_string("html", HTML_PAGE)?;
    templates.register_template_string("latex", LATEX_PAGE)?;

    let mut report = BuildReport::default();
    for (docname, path) in collect_sources(&options.srcdir, builder.outdir())? {
        let source = std::fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
        let document = Document::parse(docname.as_str(), &source, app);

        let mut translator = Translator::new(&builder, &document.docname, &state);
        translate_nodes(app, &mut translator, &document.nodes)?;
        let body = translator.astext();

        let page = match builder.kind() {
            BuilderKind::Html => templates.render(
                "html",
                &HtmlPage {
                    docname: &document.docname,
                    project: &project,
                    scripts: script_files
                        .iter()
                        .map(|script| script_uri(&document.docname, script))
                        .collect(),
                    body,
                },
            )?,
            BuilderKind::Latex => templates.render(
                "latex",
                &LatexPage {
                    title: format!("\\title{{{}}}", latex::escape(&project)),
                    body,
                },
            )?,
        };

        let target = builder.output_path(&document.docname);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        std::fs::write(&target, page).map_err(|e| BuildError::io(&target, e))?;
        log::info!("writing {}", target.display());
        report.outputs.push(target);
    }

    Ok(report)
}

fn translate_nodes(
    app: &App,
    translator: &mut Translator<'_>,
    nodes: &[Node],
) -> Result<(), BuildError> {
    for node in nodes {
        match node {
            Node::Markdown(markdown) => translator.visit_markdown(markdown),
            Node::Element(element) => {
                if visit_element(app, translator, element)? == Visit::Continue {
                    translate_nodes(app, translator, &element.children)?;
                }
            }
        }
    }
    Ok(())
}

fn visit_element(
    app: &App,
    translator: &mut Translator<'_>,
    element: &Element,
) -> Result<Visit, BuildError> {
    let kind = translator.builder().kind();
    let visit = app
        .node_handlers(&element.tag)
        .and_then(|handlers| handlers.for_builder(kind))
        .ok_or_else(|| BuildError::UnhandledNode {
            node: element.tag.clone(),
            builder: kind.name(),
        })?;

    visit(translator, element).map_err(|source| BuildError::Document {
        docname: translator.docname().to_string(),
        source,
    })
}

/// Markdown sources under `srcdir` as `(docname, path)`, sorted by docname.
fn collect_sources(srcdir: &Path, outdir: &Path) -> Result<Vec<(String, PathBuf)>, BuildError> {
    let srcdir = srcdir
        .canonicalize()
        .map_err(|e| BuildError::io(srcdir, e))?;

    let mut sources = Vec::new();
    for entry in WalkBuilder::new(&srcdir).build() {
        let entry = entry?;
        let path = entry.path();
        if path.starts_with(outdir)
            || !entry.file_type().is_some_and(|ft| ft.is_file())
            || path.extension().is_none_or(|ext| ext != "md")
        {
            continue;
        }

        let relative = path.strip_prefix(&srcdir).unwrap_or(path).with_extension("");
        let docname = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        sources.push((docname, path.to_path_buf()));
    }
    sources.sort();
    Ok(sources)
}

fn script_uri(docname: &str, script: &str) -> String {
    if script.contains("://") || script.starts_with('/') {
        script.to_string()
    } else {
        format!("{}{script}", relative_root(docname))
    }
}
