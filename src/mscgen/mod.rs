//! Message sequence charts rendered with the external `mscgen` tool.
//!
//! Authors write charts in fenced blocks:
//!
//! ````markdown
//! ```mscgen
//! msc {
//!   a, b;
//!   a => b [label="request"];
//! }
//! ```
//!
//! ```msc
//! a, b;
//! b >> a [label="reply"];
//! ```
//! ````
//!
//! `msc` blocks are wrapped in `msc { ... }` automatically. Each chart is
//! rendered at build time into `mscgen-<uuid>.<ext>` and referenced from the
//! output, or left to a client-side script when `mscgen_js` is configured.
//!
//! | config key    | default    |
//! |---------------|------------|
//! | `mscgen`      | `"mscgen"` |
//! | `mscgen_args` | `[]`       |
//! | `mscgen_js`   | unset      |

mod directives;
mod html;
mod latex;
pub mod render;

pub use directives::{Mscgen, MscgenSimple, mscgen_node};
pub use render::{MscgenConfig, MscgenRenderer, RenderedFile};

use crate::domain::{BoxError, Capabilities};
use crate::host::{App, BuildStart, BuilderKind, Extension, NodeHandlers};

/// Tag of the placeholder node.
pub const NODE: &str = "mscgen";
/// Attribute holding the chart source.
pub const CODE: &str = "code";

pub struct MscgenExtension;

impl Extension for MscgenExtension {
    fn setup(&self, app: &mut App) {
        setup(app);
    }
}

pub fn setup(app: &mut App) {
    app.register_node_type(
        NODE,
        NodeHandlers {
            html: Some(html::visit_mscgen),
            latex: Some(latex::visit_mscgen),
        },
    );
    app.register_directive("mscgen", Box::new(Mscgen));
    app.register_directive("msc", Box::new(MscgenSimple));
    app.register_config_value("mscgen", Some("mscgen".into()));
    app.register_config_value("mscgen_args", Some(toml::Value::Array(Vec::new())));
    app.register_config_value("mscgen_js", None);
    app.on_build_start(builder_inited);
}

fn builder_inited(ctx: &mut BuildStart<'_>) -> Result<(), BoxError> {
    let config = MscgenConfig::from_config(ctx.config)?;
    // Only HTML pages load scripts.
    if let (Some(js), BuilderKind::Html) = (&config.js, ctx.builder.kind()) {
        ctx.add_script_file(js.clone());
    }
    log::debug!("mscgen configured: {config:?}");
    ctx.state
        .insert(MscgenRenderer::new(config, Capabilities::detect()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{BuildState, Builder, Config, Document, Node};

    #[test]
    fn test_setup_registers_everything() {
        let mut app = App::new();
        app.setup_extension(&MscgenExtension);

        assert!(app.directive("mscgen").is_some());
        assert!(app.directive("msc").is_some());
        let handlers = app.node_handlers(NODE).expect("node type");
        assert!(handlers.html.is_some() && handlers.latex.is_some());
        for name in ["mscgen", "mscgen_args", "mscgen_js"] {
            assert!(app.config_values().contains_key(name), "{name}");
        }
        assert_eq!(app.config_values()["mscgen_js"], None);
    }

    #[test]
    fn test_both_block_forms_capture_code() {
        let mut app = App::new();
        setup(&mut app);

        let source = "```mscgen\nX\nY\n```\n\n```msc\nX\nY\n```\n";
        let doc = Document::parse("index", source, &app);
        assert_eq!(
            doc.nodes,
            vec![mscgen_node("X\nY"), mscgen_node("msc {\nX\nY\n}\n")]
        );
        assert!(matches!(&doc.nodes[0], Node::Element(e) if e.tag == NODE));
    }

    #[test]
    fn test_script_file_only_for_html() {
        let mut app = App::new();
        setup(&mut app);
        let mut user = toml::Table::new();
        user.insert("mscgen_js".into(), "_static/mscgen-inpage.js".into());
        let config = Config::resolve(user, app.config_values());
        let dir = tempfile::tempdir().unwrap();

        for (kind, expected) in [
            (BuilderKind::Html, vec!["_static/mscgen-inpage.js".to_string()]),
            (BuilderKind::Latex, Vec::new()),
        ] {
            let builder = Builder::new(kind, dir.path(), &config).unwrap();
            let mut state = BuildState::default();
            let mut script_files = Vec::new();
            app.emit_build_start(&mut BuildStart {
                config: &config,
                builder: &builder,
                state: &mut state,
                script_files: &mut script_files,
            })
            .unwrap();

            assert_eq!(script_files, expected, "{}", kind.name());
            assert!(state.get::<MscgenRenderer>().is_some());
        }
    }
}
