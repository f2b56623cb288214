//! `sqrt x` and `root[n] x`.

use super::LayoutPass;
use crate::math::ast::{LimitsBase, Node};
use crate::math::symbols::RADICAL;

pub struct RootPass;

/// Whether `node` opens a root, and the index it carries if it was given one
/// through a range bracket.
fn radical(node: &Node) -> Option<Option<&Node>> {
    match node {
        Node::Operator { symbol } if symbol.as_str() == RADICAL => Some(None),
        Node::Limits {
            base: LimitsBase::Glyph(glyph),
            lower,
            ..
        } if glyph.as_str() == RADICAL => Some(Some(lower.as_ref())),
        _ => None,
    }
}

impl LayoutPass for RootPass {
    fn name(&self) -> &'static str {
        "roots"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.sequence_mut() else {
            return;
        };

        let mut i = elements.len();
        while i > 1 {
            i -= 1;
            let Some(index) = radical(&elements[i - 1]) else {
                continue;
            };
            let index = index.cloned().map(Box::new);
            let radicand = Box::new(elements.remove(i).unwrap_bracketed());
            elements[i - 1] = Node::Root { radicand, index };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radical_takes_the_next_operand() {
        let mut node = Node::Row {
            elements: vec![Node::operator(RADICAL), Node::identifier("x")],
        };
        RootPass.visit(&mut node);
        assert_eq!(
            node,
            Node::Row {
                elements: vec![Node::Root {
                    radicand: Box::new(Node::identifier("x")),
                    index: None,
                }]
            }
        );
    }

    #[test]
    fn range_bracket_supplies_the_index() {
        let mut node = Node::Cluster {
            elements: vec![
                Node::Limits {
                    base: LimitsBase::Glyph(RADICAL.into()),
                    lower: Box::new(Node::number("3")),
                    upper: None,
                },
                Node::bracketed("(", ")", Some(Node::identifier("y"))).unwrap(),
            ],
        };
        RootPass.visit(&mut node);
        assert_eq!(
            node,
            Node::Cluster {
                elements: vec![Node::Root {
                    radicand: Box::new(Node::identifier("y")),
                    index: Some(Box::new(Node::number("3"))),
                }]
            }
        );
    }

    #[test]
    fn nested_radicals_fold_inside_out() {
        let mut node = Node::Row {
            elements: vec![
                Node::operator(RADICAL),
                Node::operator(RADICAL),
                Node::identifier("z"),
            ],
        };
        RootPass.visit(&mut node);
        assert_eq!(
            node,
            Node::Row {
                elements: vec![Node::Root {
                    radicand: Box::new(Node::Root {
                        radicand: Box::new(Node::identifier("z")),
                        index: None,
                    }),
                    index: None,
                }]
            }
        );
    }

    #[test]
    fn trailing_radical_stays_an_operator() {
        let mut node = Node::Row {
            elements: vec![Node::identifier("a"), Node::operator(RADICAL)],
        };
        let before = node.clone();
        RootPass.visit(&mut node);
        assert_eq!(node, before);
    }
}
