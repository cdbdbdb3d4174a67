//! A small Markdown documentation builder with extension points.
//!
//! Extensions register node types, directives, config values and
//! build-start hooks on an [`App`]. A build then parses every source
//! document, lets directives replace fenced code blocks with nodes, and
//! hands each node to the handler registered for the active builder.

pub mod builder;
pub mod config;
pub mod document;
mod latex;
pub mod project;
pub mod state;
pub mod translator;

pub use builder::{Builder, BuilderKind};
pub use config::Config;
pub use document::{Document, Element, Node};
pub use project::{BuildOptions, BuildReport, build};
pub use state::{BuildStart, BuildState};
pub use translator::{Translator, Visit, VisitResult};

use crate::domain::BoxError;
use std::collections::{BTreeMap, HashMap};

/// Handler invoked when a translator reaches a registered node.
pub type VisitFn = fn(&mut Translator<'_>, &Element) -> VisitResult;

/// Per-builder handlers for one node type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeHandlers {
    pub html: Option<VisitFn>,
    pub latex: Option<VisitFn>,
}

impl NodeHandlers {
    pub fn for_builder(&self, kind: BuilderKind) -> Option<VisitFn> {
        match kind {
            BuilderKind::Html => self.html,
            BuilderKind::Latex => self.latex,
        }
    }
}

/// A fenced code block keyword that turns the block's lines into nodes.
pub trait Directive {
    fn run(&self, content: &[String]) -> Vec<Node>;
}

/// Plugin entry point.
pub trait Extension {
    fn setup(&self, app: &mut App);
}

type BuildStartHook = Box<dyn Fn(&mut BuildStart<'_>) -> Result<(), BoxError>>;

/// Registry of everything extensions contribute to a build.
pub struct App {
    nodes: HashMap<String, NodeHandlers>,
    directives: HashMap<String, Box<dyn Directive>>,
    config_values: BTreeMap<String, Option<toml::Value>>,
    build_start: Vec<BuildStartHook>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            nodes: HashMap::new(),
            directives: HashMap::new(),
            config_values: BTreeMap::new(),
            build_start: Vec::new(),
        };
        app.register_config_value("project", Some("Documentation".into()));
        app.register_config_value("imgpath", Some(config::DEFAULT_IMGPATH.into()));
        app
    }

    pub fn setup_extension(&mut self, extension: &dyn Extension) -> &mut Self {
        extension.setup(self);
        self
    }

    pub fn register_node_type(&mut self, name: &str, handlers: NodeHandlers) {
        if self.nodes.insert(name.to_string(), handlers).is_some() {
            log::warn!("node type `{name}` registered twice, keeping the last handlers");
        }
    }

    pub fn register_directive(&mut self, name: &str, directive: Box<dyn Directive>) {
        if self.directives.insert(name.to_string(), directive).is_some() {
            log::warn!("directive `{name}` registered twice, keeping the last one");
        }
    }

    /// Declares a config value. `None` means the value is unset unless configured.
    pub fn register_config_value(&mut self, name: &str, default: Option<toml::Value>) {
        self.config_values.insert(name.to_string(), default);
    }

    pub fn on_build_start<F>(&mut self, hook: F)
    where
        F: Fn(&mut BuildStart<'_>) -> Result<(), BoxError> + 'static,
    {
        self.build_start.push(Box::new(hook));
    }

    pub fn node_handlers(&self, name: &str) -> Option<&NodeHandlers> {
        self.nodes.get(name)
    }

    pub fn directive(&self, name: &str) -> Option<&dyn Directive> {
        self.directives.get(name).map(|directive| directive.as_ref())
    }

    pub fn config_values(&self) -> &BTreeMap<String, Option<toml::Value>> {
        &self.config_values
    }

    pub(crate) fn emit_build_start(&self, ctx: &mut BuildStart<'_>) -> Result<(), BoxError> {
        for hook in &self.build_start {
            hook(ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Directive for Upper {
        fn run(&self, content: &[String]) -> Vec<Node> {
            vec![Node::Markdown(content.join("\n").to_uppercase())]
        }
    }

    struct UpperExtension;

    impl Extension for UpperExtension {
        fn setup(&self, app: &mut App) {
            app.register_directive("upper", Box::new(Upper));
            app.register_config_value("upper_enabled", Some(true.into()));
        }
    }

    #[test]
    fn test_host_values_are_registered() {
        let app = App::new();
        assert!(app.config_values().contains_key("project"));
        assert!(app.config_values().contains_key("imgpath"));
    }

    #[test]
    fn test_extension_setup_registers_directive() {
        let mut app = App::new();
        app.setup_extension(&UpperExtension);

        let directive = app.directive("upper").expect("directive");
        assert_eq!(
            directive.run(&["a".to_string()]),
            vec![Node::Markdown("A".to_string())]
        );
        assert!(app.directive("lower").is_none());
        assert_eq!(
            app.config_values().get("upper_enabled"),
            Some(&Some(toml::Value::Boolean(true)))
        );
    }

    #[test]
    fn test_handlers_per_builder() {
        fn visit(_: &mut Translator<'_>, _: &Element) -> VisitResult {
            Ok(Visit::SkipNode)
        }

        let handlers = NodeHandlers {
            html: Some(visit),
            latex: None,
        };
        assert!(handlers.for_builder(BuilderKind::Html).is_some());
        assert!(handlers.for_builder(BuilderKind::Latex).is_none());
    }
}
