//! Passes that act on operators themselves rather than on what they bind.

use super::LayoutPass;
use crate::math::ast::Node;
use crate::math::symbols::{
    ASTERISK, DOT_PRODUCT, FACTORIAL, INVISIBLE_PRODUCT, LOGICAL_AND, LOGICAL_NOT, MINUS, PLUS,
    PRIME, SUPERSCRIPT,
};

/// Drops the `.` placeholder written between two tightly bound terms.
pub struct InvisibleProductPass;

impl LayoutPass for InvisibleProductPass {
    fn name(&self) -> &'static str {
        "invisible-product"
    }

    fn visit(&self, node: &mut Node) {
        if let Some(elements) = node.cluster_mut() {
            elements.retain(|element| !element.is_operator(INVISIBLE_PRODUCT));
        }
    }
}

/// Settles glyphs whose meaning depends on what survived the earlier passes.
///
/// A `.` that was never inside a cluster is a visible dot product, a `^` that
/// did not become an exponent is logical and, and a `!` that opens a cluster is
/// logical not rather than a factorial.
pub struct OperatorMeaningPass;

impl LayoutPass for OperatorMeaningPass {
    fn name(&self) -> &'static str {
        "operator-meaning"
    }

    fn visit(&self, node: &mut Node) {
        match node {
            Node::Operator { symbol } if symbol.as_str() == INVISIBLE_PRODUCT => {
                *symbol = DOT_PRODUCT.to_string();
            }
            Node::Operator { symbol } if symbol.as_str() == SUPERSCRIPT => {
                *symbol = LOGICAL_AND.to_string();
            }
            Node::Cluster { elements } => {
                if let Some(Node::Operator { symbol }) = elements.first_mut() {
                    if symbol.as_str() == FACTORIAL {
                        *symbol = LOGICAL_NOT.to_string();
                    }
                }
            }
            _ => {}
        }
    }
}

/// Raises marks that are drawn as superscripts: primes after any operand, and a
/// trailing `+`, `-` or `*` (one-sided limits, conjugates).
pub struct OperatorSuperscriptPass;

fn is_trailing_mark(symbol: &str) -> bool {
    matches!(symbol, PLUS | MINUS | ASTERISK)
}

fn raise(base: Node, superscript: Node) -> Node {
    match base {
        Node::Scripted {
            base,
            subscript: Some(subscript),
            superscript: None,
        } => Node::Scripted {
            base,
            subscript: Some(subscript),
            superscript: Some(Box::new(superscript)),
        },
        base => Node::Scripted {
            base: Box::new(base),
            subscript: None,
            superscript: Some(Box::new(superscript)),
        },
    }
}

impl LayoutPass for OperatorSuperscriptPass {
    fn name(&self) -> &'static str {
        "operator-superscripts"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.cluster_mut() else {
            return;
        };

        let mut i = 1;
        while i < elements.len() {
            if !elements[i - 1].is_operand() {
                i += 1;
                continue;
            }

            if elements[i].is_operator(PRIME) {
                let primes = elements[i..]
                    .iter()
                    .take_while(|element| element.is_operator(PRIME))
                    .count();
                let glyphs = PRIME.repeat(primes);
                elements.drain(i..i + primes);
                let base = elements.remove(i - 1);
                elements.insert(i - 1, raise(base, Node::operator(glyphs)));
            } else if i + 1 == elements.len()
                && elements[i].as_operator().is_some_and(is_trailing_mark)
            {
                let mark = elements.remove(i);
                let base = elements.remove(i - 1);
                elements.insert(i - 1, raise(base, mark));
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(elements: Vec<Node>) -> Node {
        Node::Cluster { elements }
    }

    fn sup(base: Node, superscript: Node) -> Node {
        Node::Scripted {
            base: Box::new(base),
            subscript: None,
            superscript: Some(Box::new(superscript)),
        }
    }

    #[test]
    fn invisible_product_is_dropped_inside_clusters() {
        let mut node = cluster(vec![
            Node::identifier("a"),
            Node::operator(INVISIBLE_PRODUCT),
            Node::identifier("b"),
        ]);
        InvisibleProductPass.visit(&mut node);
        assert_eq!(
            node,
            cluster(vec![Node::identifier("a"), Node::identifier("b")])
        );
    }

    #[test]
    fn lone_operators_change_meaning() {
        let mut dot = Node::operator(INVISIBLE_PRODUCT);
        OperatorMeaningPass.visit(&mut dot);
        assert_eq!(dot, Node::operator(DOT_PRODUCT));

        let mut caret = Node::operator(SUPERSCRIPT);
        OperatorMeaningPass.visit(&mut caret);
        assert_eq!(caret, Node::operator(LOGICAL_AND));
    }

    #[test]
    fn leading_bang_is_negation_trailing_is_factorial() {
        let mut negated = cluster(vec![Node::operator(FACTORIAL), Node::identifier("p")]);
        OperatorMeaningPass.visit(&mut negated);
        assert_eq!(
            negated,
            cluster(vec![Node::operator(LOGICAL_NOT), Node::identifier("p")])
        );

        let mut factorial = cluster(vec![Node::identifier("n"), Node::operator(FACTORIAL)]);
        let before = factorial.clone();
        OperatorMeaningPass.visit(&mut factorial);
        assert_eq!(factorial, before);
    }

    #[test]
    fn consecutive_primes_share_one_superscript() {
        let mut node = cluster(vec![
            Node::identifier("f"),
            Node::operator(PRIME),
            Node::operator(PRIME),
            Node::identifier("x"),
        ]);
        OperatorSuperscriptPass.visit(&mut node);
        assert_eq!(
            node,
            cluster(vec![
                sup(Node::identifier("f"), Node::operator("&prime;&prime;")),
                Node::identifier("x"),
            ])
        );
    }

    #[test]
    fn only_a_final_sign_is_raised() {
        let mut one_sided = cluster(vec![Node::number("0"), Node::operator(PLUS)]);
        OperatorSuperscriptPass.visit(&mut one_sided);
        assert_eq!(
            one_sided,
            cluster(vec![sup(Node::number("0"), Node::operator(PLUS))])
        );

        let mut sum = cluster(vec![
            Node::identifier("a"),
            Node::operator(PLUS),
            Node::identifier("b"),
        ]);
        let before = sum.clone();
        OperatorSuperscriptPass.visit(&mut sum);
        assert_eq!(sum, before);
    }

    #[test]
    fn prime_lands_on_an_open_superscript_slot() {
        let mut node = cluster(vec![
            Node::Scripted {
                base: Box::new(Node::identifier("y")),
                subscript: Some(Box::new(Node::number("1"))),
                superscript: None,
            },
            Node::operator(PRIME),
        ]);
        OperatorSuperscriptPass.visit(&mut node);
        assert_eq!(
            node,
            cluster(vec![Node::Scripted {
                base: Box::new(Node::identifier("y")),
                subscript: Some(Box::new(Node::number("1"))),
                superscript: Some(Box::new(Node::operator(PRIME))),
            }])
        );
    }
}
