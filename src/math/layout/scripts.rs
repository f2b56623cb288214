//! Subscripts and exponents.
//!
//! Both scan a cluster from the end so that `a_b_c` nests to the right and no
//! index is reused after a splice.

use super::LayoutPass;
use crate::math::ast::Node;
use crate::math::symbols::{SUBSCRIPT, SUPERSCRIPT};

pub struct SubscriptPass;

impl LayoutPass for SubscriptPass {
    fn name(&self) -> &'static str {
        "subscripts"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.cluster_mut() else {
            return;
        };

        // Explicit `base_sub`. With nothing usable on the left the base is blank.
        let mut i = elements.len();
        while i > 0 {
            i -= 1;
            if !elements[i].is_operator(SUBSCRIPT) || i + 1 >= elements.len() {
                continue;
            }
            let subscript = elements.remove(i + 1).unwrap_bracketed();
            let base = if i > 0 && elements[i - 1].is_operand() {
                elements.remove(i);
                i -= 1;
                elements.remove(i)
            } else {
                elements.remove(i);
                Node::identifier("")
            };
            elements.insert(
                i,
                Node::Scripted {
                    base: Box::new(base),
                    subscript: Some(Box::new(subscript)),
                    superscript: None,
                },
            );
        }

        // Implicit `x1`: a number straight after an identifier.
        let mut i = elements.len();
        while i > 1 {
            i -= 1;
            let implicit = matches!(elements[i - 1], Node::Identifier { .. })
                && matches!(elements[i], Node::Number { .. });
            if implicit {
                let subscript = elements.remove(i);
                let base = elements.remove(i - 1);
                elements.insert(
                    i - 1,
                    Node::Scripted {
                        base: Box::new(base),
                        subscript: Some(Box::new(subscript)),
                        superscript: None,
                    },
                );
            }
        }
    }
}

pub struct ExponentPass;

impl LayoutPass for ExponentPass {
    fn name(&self) -> &'static str {
        "exponents"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.cluster_mut() else {
            return;
        };

        let mut i = elements.len();
        while i > 1 {
            i -= 1;
            if !elements[i].is_operator(SUPERSCRIPT)
                || i + 1 >= elements.len()
                || !elements[i - 1].is_operand()
            {
                continue;
            }
            let superscript = Box::new(elements.remove(i + 1).unwrap_bracketed());
            elements.remove(i);
            i -= 1;
            let base = elements.remove(i);
            let scripted = match base {
                Node::Scripted {
                    base,
                    subscript: Some(subscript),
                    superscript: None,
                } => Node::Scripted {
                    base,
                    subscript: Some(subscript),
                    superscript: Some(superscript),
                },
                base => Node::Scripted {
                    base: Box::new(base),
                    subscript: None,
                    superscript: Some(superscript),
                },
            };
            elements.insert(i, scripted);
        }
    }
}
