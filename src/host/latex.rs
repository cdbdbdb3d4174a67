//! Markdown events to LaTeX.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};

pub fn push_latex<'a, I>(out: &mut String, events: I)
where
    I: Iterator<Item = Event<'a>>,
{
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { level, .. } => {
                    out.push_str("\n\\");
                    out.push_str(section_command(level));
                    out.push('{');
                }
                Tag::Paragraph => out.push('\n'),
                Tag::Emphasis => out.push_str("\\emph{"),
                Tag::Strong => out.push_str("\\textbf{"),
                Tag::CodeBlock(_) => {
                    in_code_block = true;
                    out.push_str("\n\\begin{verbatim}\n");
                }
                Tag::List(Some(_)) => out.push_str("\n\\begin{enumerate}\n"),
                Tag::List(None) => out.push_str("\n\\begin{itemize}\n"),
                Tag::Item => out.push_str("\\item "),
                Tag::Link { dest_url, .. } => {
                    out.push_str("\\href{");
                    out.push_str(&dest_url.replace('%', "\\%").replace('#', "\\#"));
                    out.push_str("}{");
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Heading(_) => out.push_str("}\n"),
                TagEnd::Paragraph => out.push('\n'),
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Link => out.push('}'),
                TagEnd::CodeBlock => {
                    in_code_block = false;
                    out.push_str("\\end{verbatim}\n");
                }
                TagEnd::List(true) => out.push_str("\\end{enumerate}\n"),
                TagEnd::List(false) => out.push_str("\\end{itemize}\n"),
                TagEnd::Item => out.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_code_block => out.push_str(&text),
            Event::Text(text) => out.push_str(&escape(&text)),
            Event::Code(code) => {
                out.push_str("\\texttt{");
                out.push_str(&escape(&code));
                out.push('}');
            }
            Event::SoftBreak => out.push('\n'),
            Event::HardBreak => out.push_str("\\\\\n"),
            Event::Rule => out.push_str("\n\\noindent\\rule{\\linewidth}{0.4pt}\n"),
            _ => {}
        }
    }
}

fn section_command(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "section",
        HeadingLevel::H2 => "subsection",
        HeadingLevel::H3 => "subsubsection",
        HeadingLevel::H4 => "paragraph",
        HeadingLevel::H5 | HeadingLevel::H6 => "subparagraph",
    }
}

/// Escapes LaTeX special characters in running text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}
