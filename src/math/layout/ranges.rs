//! Ranges and limits: `sum[i=1..n]`, `lim[x->0]`, `x[a..b]`.
//!
//! A square-bracket group right after something that can carry limits becomes
//! its lower and upper bound. Operators (and limits already built on one) get a
//! [`Node::Limits`]; identifiers and bracketed groups get plain scripts, which is
//! an alternate way to write a subscript and superscript pair.

use super::LayoutPass;
use crate::math::ast::{LimitsBase, Node};
use crate::math::symbols::{FRACTION, RANGE};

pub struct RangePass;

fn takes_range(node: &Node) -> bool {
    match node {
        Node::Operator { symbol } => symbol != FRACTION && symbol != RANGE,
        Node::Limits { .. } | Node::Bracketed { .. } | Node::Identifier { .. } => true,
        _ => false,
    }
}

fn is_range_bracket(node: &Node) -> bool {
    node.bracket_left() == Some("[")
}

/// Split bracket contents on a top-level `..`.
pub(crate) fn split_range(contents: Option<Box<Node>>) -> (Node, Option<Node>) {
    let Some(contents) = contents else {
        return (Node::Row { elements: Vec::new() }, None);
    };
    match *contents {
        Node::Row { mut elements } => {
            match elements.iter().position(|element| element.is_operator(RANGE)) {
                Some(at) => {
                    let upper: Vec<Node> = elements.drain(at + 1..).collect();
                    elements.truncate(at);
                    let lower = Node::row(elements).unwrap_or(Node::Row {
                        elements: Vec::new(),
                    });
                    (lower, Node::row(upper))
                }
                None => (Node::Row { elements }, None),
            }
        }
        other => (other, None),
    }
}

fn fold(target: Node, lower: Node, upper: Option<Node>) -> Node {
    let lower = Box::new(lower);
    let upper = upper.map(Box::new);
    match target {
        Node::Operator { symbol } => Node::Limits {
            base: LimitsBase::Glyph(symbol),
            lower,
            upper,
        },
        limits @ Node::Limits { .. } => Node::Limits {
            base: LimitsBase::Node(Box::new(limits)),
            lower,
            upper,
        },
        base => Node::Scripted {
            base: Box::new(base),
            subscript: Some(lower),
            superscript: upper,
        },
    }
}

impl LayoutPass for RangePass {
    fn name(&self) -> &'static str {
        "ranges"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.cluster_mut() else {
            return;
        };

        // Stay on the same index after a fold so `[..][..]` stacks.
        let mut i = 1;
        while i < elements.len() {
            if !(is_range_bracket(&elements[i]) && takes_range(&elements[i - 1])) {
                i += 1;
                continue;
            }
            let Node::Bracketed { contents, .. } = elements.remove(i) else {
                continue;
            };
            let (lower, upper) = split_range(contents);
            let target = elements.remove(i - 1);
            elements.insert(i - 1, fold(target, lower, upper));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_bracket(contents: Node) -> Node {
        Node::bracketed("[", "]", Some(contents)).unwrap()
    }

    fn from_to(lower: Node, upper: Node) -> Node {
        Node::Row {
            elements: vec![lower, Node::operator(RANGE), upper],
        }
    }

    #[test]
    fn operator_with_range_becomes_limits() {
        let mut node = Node::Cluster {
            elements: vec![
                Node::operator("&sum;"),
                range_bracket(from_to(Node::number("1"), Node::identifier("n"))),
            ],
        };
        RangePass.visit(&mut node);
        assert_eq!(
            node,
            Node::Cluster {
                elements: vec![Node::Limits {
                    base: LimitsBase::Glyph("&sum;".into()),
                    lower: Box::new(Node::number("1")),
                    upper: Some(Box::new(Node::identifier("n"))),
                }]
            }
        );
    }

    #[test]
    fn lower_only_without_separator() {
        let (lower, upper) = split_range(Some(Box::new(Node::identifier("x"))));
        assert_eq!(lower, Node::identifier("x"));
        assert_eq!(upper, None);
    }

    #[test]
    fn missing_lower_bound_is_an_empty_row() {
        let contents = Node::Row {
            elements: vec![Node::operator(RANGE), Node::identifier("n")],
        };
        let (lower, upper) = split_range(Some(Box::new(contents)));
        assert_eq!(lower, Node::Row { elements: vec![] });
        assert_eq!(upper, Some(Node::identifier("n")));
    }

    #[test]
    fn second_range_stacks_on_the_first() {
        let mut node = Node::Cluster {
            elements: vec![
                Node::operator("&sum;"),
                range_bracket(Node::identifier("i")),
                range_bracket(Node::identifier("j")),
            ],
        };
        RangePass.visit(&mut node);
        let Node::Cluster { elements } = &node else {
            panic!("expected a cluster");
        };
        assert_eq!(elements.len(), 1);
        let Node::Limits {
            base: LimitsBase::Node(inner),
            lower,
            ..
        } = &elements[0]
        else {
            panic!("expected nested limits, got {:?}", elements[0]);
        };
        assert_eq!(**lower, Node::identifier("j"));
        assert_eq!(inner.kind_name(), "Limits");
    }

    #[test]
    fn identifier_with_range_is_scripted() {
        let mut node = Node::Cluster {
            elements: vec![
                Node::identifier("x"),
                range_bracket(from_to(Node::identifier("a"), Node::identifier("b"))),
            ],
        };
        RangePass.visit(&mut node);
        assert_eq!(
            node,
            Node::Cluster {
                elements: vec![Node::Scripted {
                    base: Box::new(Node::identifier("x")),
                    subscript: Some(Box::new(Node::identifier("a"))),
                    superscript: Some(Box::new(Node::identifier("b"))),
                }]
            }
        );
    }

    #[test]
    fn fraction_bar_does_not_take_a_range() {
        let mut node = Node::Cluster {
            elements: vec![
                Node::number("1"),
                Node::operator(FRACTION),
                range_bracket(Node::number("2")),
            ],
        };
        let before = node.clone();
        RangePass.visit(&mut node);
        assert_eq!(node, before);
    }

    #[test]
    fn round_brackets_are_not_ranges() {
        let mut node = Node::Cluster {
            elements: vec![
                Node::identifier("f"),
                Node::bracketed("(", ")", Some(Node::identifier("x"))).unwrap(),
            ],
        };
        let before = node.clone();
        RangePass.visit(&mut node);
        assert_eq!(node, before);
    }
}
