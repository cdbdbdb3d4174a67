use crate::host::App;
use crate::host::Directive;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use std::collections::BTreeMap;

/// A generic element in the document tree, created by directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Markdown passed through to the builder untouched.
    Markdown(String),
    Element(Element),
}

/// A parsed source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub docname: String,
    pub nodes: Vec<Node>,
}

pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

impl Document {
    /// Splits `source` into Markdown chunks and directive output.
    ///
    /// A top-level fenced code block whose first info word names a registered
    /// directive is replaced by whatever that directive returns for the
    /// block's lines. Blocks nested in lists, quotes or footnotes stay plain
    /// code blocks so their container is never split.
    pub fn parse(docname: impl Into<String>, source: &str, app: &App) -> Self {
        let mut nodes = Vec::new();
        let mut cursor = 0;
        let mut depth = 0usize;
        let mut capture: Option<(&dyn Directive, String)> = None;

        for (event, range) in Parser::new_ext(source, markdown_options()).into_offset_iter() {
            let top_level = depth == 0;
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth = depth.saturating_sub(1),
                _ => {}
            }

            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) if top_level => {
                    let name = info.split_whitespace().next().unwrap_or_default();
                    if let Some(directive) = app.directive(name) {
                        push_markdown(&mut nodes, &source[cursor..range.start]);
                        cursor = range.end;
                        capture = Some((directive, String::new()));
                    }
                }
                Event::Text(text) => {
                    if let Some((_, content)) = capture.as_mut() {
                        content.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((directive, content)) = capture.take() {
                        let lines: Vec<String> = content.lines().map(str::to_string).collect();
                        nodes.extend(directive.run(&lines));
                    }
                }
                _ => {}
            }
        }
        push_markdown(&mut nodes, &source[cursor.min(source.len())..]);

        Self {
            docname: docname.into(),
            nodes,
        }
    }
}

fn push_markdown(nodes: &mut Vec<Node>, chunk: &str) {
    if !chunk.trim().is_empty() {
        nodes.push(Node::Markdown(chunk.to_string()));
    }
}
