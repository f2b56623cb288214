//! Labelled braces: `overbrace(comment;base)` and `underbrace(comment;base)`.
//!
//! These usually come from arrow lines rewritten by the preprocessor, but can
//! be written directly. The bracket must hold exactly two grid rows.

use super::LayoutPass;
use crate::math::ast::{GridRow, Node};
use crate::math::symbols::{OVERBRACE, UNDERBRACE};

pub struct BracePass;

/// A grid row as one node: its only cell, or all cells side by side.
fn flatten(row: GridRow) -> Node {
    let mut cells: Vec<Node> = row.cells.into_iter().map(|cell| cell.row).collect();
    if cells.len() == 1 {
        cells.remove(0)
    } else {
        Node::Row { elements: cells }
    }
}

fn is_two_row_bracket(node: &Node) -> bool {
    matches!(
        node,
        Node::Bracketed { contents: Some(contents), .. }
            if matches!(contents.as_ref(), Node::Grid { rows } if rows.len() == 2)
    )
}

impl LayoutPass for BracePass {
    fn name(&self) -> &'static str {
        "braces"
    }

    fn visit(&self, node: &mut Node) {
        let Some(elements) = node.sequence_mut() else {
            return;
        };

        let mut i = elements.len();
        while i > 1 {
            i -= 1;
            let over = match elements[i - 1].as_operator() {
                Some(OVERBRACE) => true,
                Some(UNDERBRACE) => false,
                _ => continue,
            };
            if !is_two_row_bracket(&elements[i]) {
                continue;
            }
            let Node::Bracketed {
                contents: Some(contents),
                ..
            } = elements.remove(i)
            else {
                continue;
            };
            let Node::Grid { rows } = *contents else {
                continue;
            };
            let mut rows = rows.into_iter();
            let (Some(comment), Some(base)) = (rows.next(), rows.next()) else {
                continue;
            };
            let (comment, base) = (Box::new(flatten(comment)), Box::new(flatten(base)));
            elements[i - 1] = if over {
                Node::Overbrace { base, comment }
            } else {
                Node::Underbrace { base, comment }
            };
        }
    }
}
