use super::{CODE, NODE};
use crate::host::{Directive, Element, Node};

/// `mscgen` blocks hold a complete chart.
pub struct Mscgen;

impl Directive for Mscgen {
    fn run(&self, content: &[String]) -> Vec<Node> {
        vec![mscgen_node(content.join("\n"))]
    }
}

/// `msc` blocks hold only the body that goes inside `msc { ... }`.
pub struct MscgenSimple;

impl Directive for MscgenSimple {
    fn run(&self, content: &[String]) -> Vec<Node> {
        vec![mscgen_node(format!("msc {{\n{}\n}}\n", content.join("\n")))]
    }
}

pub fn mscgen_node(code: impl Into<String>) -> Node {
    Node::Element(Element::new(NODE).with_attribute(CODE, code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn code(nodes: Vec<Node>) -> String {
        match nodes.as_slice() {
            [Node::Element(element)] => {
                assert_eq!(element.tag, NODE);
                element.get(CODE).unwrap().to_string()
            }
            other => panic!("expected one mscgen node, got {other:?}"),
        }
    }

    #[test]
    fn test_raw_form_is_verbatim() {
        assert_eq!(code(Mscgen.run(&lines("X\nY"))), "X\nY");
    }

    #[test]
    fn test_wrapped_form_template() {
        assert_eq!(code(MscgenSimple.run(&lines("X\nY"))), "msc {\nX\nY\n}\n");
    }
}
