use crate::domain::BoxError;
use crate::host::document::markdown_options;
use crate::host::{Builder, BuilderKind, BuildState, latex};
use pulldown_cmark::Parser;
use std::any::Any;

/// What the translator does after a node handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Translate the node's children as well.
    Continue,
    /// The handler emitted everything for this node; children are skipped.
    SkipNode,
}

pub type VisitResult = Result<Visit, BoxError>;

/// Accumulates the output body of one document.
pub struct Translator<'a> {
    builder: &'a Builder,
    docname: &'a str,
    state: &'a BuildState,
    pub body: Vec<String>,
}

impl<'a> Translator<'a> {
    pub fn new(builder: &'a Builder, docname: &'a str, state: &'a BuildState) -> Self {
        Self {
            builder,
            docname,
            state,
            body: Vec::new(),
        }
    }

    pub fn builder(&self) -> &'a Builder {
        self.builder
    }

    pub fn docname(&self) -> &'a str {
        self.docname
    }

    pub fn state<T: Any>(&self) -> Option<&'a T> {
        self.state.get::<T>()
    }

    /// An HTML start tag with escaped attribute values, in the given order.
    pub fn starttag(&self, tag: &str, attributes: &[(&str, &str)]) -> String {
        let mut out = format!("<{tag}");
        for (name, value) in attributes {
            out.push_str(&format!(" {name}=\"{}\"", self.encode(value)));
        }
        out.push('>');
        out
    }

    /// Escapes text for HTML content and attribute values.
    pub fn encode(&self, text: &str) -> String {
        html_escape(text)
    }

    pub fn visit_markdown(&mut self, markdown: &str) {
        let parser = Parser::new_ext(markdown, markdown_options());
        let mut out = String::new();
        match self.builder.kind() {
            BuilderKind::Html => pulldown_cmark::html::push_html(&mut out, parser),
            BuilderKind::Latex => latex::push_latex(&mut out, parser),
        }
        self.body.push(out);
    }

    pub fn astext(&self) -> String {
        self.body.concat()
    }
}

pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Config;

    fn builder(kind: BuilderKind, dir: &std::path::Path) -> Builder {
        Builder::new(kind, dir, &Config::default()).unwrap()
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a => b [label=\"x\"]"), "a =&gt; b [label=&quot;x&quot;]");
        assert_eq!(html_escape("a & b <c>"), "a &amp; b &lt;c&gt;");
    }

    #[test]
    fn test_starttag_keeps_attribute_order() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder(BuilderKind::Html, dir.path());
        let state = BuildState::default();
        let t = Translator::new(&builder, "index", &state);

        assert_eq!(
            t.starttag("script", &[("type", "text/x-mscgen"), ("data-named-style", "classic")]),
            r#"<script type="text/x-mscgen" data-named-style="classic">"#
        );
        assert_eq!(t.starttag("p", &[("title", "<b>")]), r#"<p title="&lt;b&gt;">"#);
    }

    #[test]
    fn test_markdown_follows_builder() {
        let dir = tempfile::tempdir().unwrap();
        let state = BuildState::default();

        let html = builder(BuilderKind::Html, dir.path());
        let mut t = Translator::new(&html, "index", &state);
        t.visit_markdown("Some *text*.");
        assert_eq!(t.astext(), "<p>Some <em>text</em>.</p>\n");

        let tex = builder(BuilderKind::Latex, dir.path());
        let mut t = Translator::new(&tex, "index", &state);
        t.visit_markdown("Some *text*.");
        assert_eq!(t.astext(), "\nSome \\emph{text}.\n");
    }
}
