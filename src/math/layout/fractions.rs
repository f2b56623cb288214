//! Fractions.
//!
//! The first `/` that has something on both sides splits the whole sequence:
//! everything before it is the numerator, everything after the denominator.
//! `a/b/c` therefore reads as `a/(b/c)` once the denominator is walked.

use super::LayoutPass;
use crate::math::ast::Node;
use crate::math::symbols::FRACTION;

pub struct FractionPass;

/// One side of the bar as a single node, brackets stripped.
fn operand(elements: Vec<Node>) -> Node {
    Node::cluster(elements)
        .map(Node::unwrap_bracketed)
        .unwrap_or_else(|| Node::Row { elements: Vec::new() })
}

impl LayoutPass for FractionPass {
    fn name(&self) -> &'static str {
        "fractions"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.sequence_mut() else {
            return;
        };

        let Some(bar) = (1..elements.len().saturating_sub(1))
            .find(|&i| elements[i].is_operator(FRACTION))
        else {
            return;
        };

        let denominator: Vec<Node> = elements.drain(bar + 1..).collect();
        elements.truncate(bar);
        let numerator: Vec<Node> = std::mem::take(elements);
        elements.push(Node::Fraction {
            numerator: Box::new(operand(numerator)),
            denominator: Box::new(operand(denominator)),
        });
    }
}
