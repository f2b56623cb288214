//! Treeviz formatter for expression trees
//!
//! One line per node, nesting drawn with box connectors:
//!
//!   ▦ 2 rows
//!   ├─ ⁄ fraction
//!   │ ├─ # 1
//!   │ └─ # 2
//!   └─ 𝑥 x
//!
//! Icons
//!     Structure:
//!         Grid: ▦
//!         Row: ↔
//!         Cluster: ⋯
//!         Bracketed: ⟮
//!     Leaves:
//!         Identifier: 𝑥
//!         Operator: ±
//!         Number: #
//!         Text: ¶
//!     Layout results:
//!         Fraction: ⁄
//!         Scripted: ⌃
//!         Root: √
//!         Limits: ∑
//!         Overbrace: ⏞
//!         Underbrace: ⏟

use super::registry::{FormatError, Formatter};
use crate::math::ast::{LimitsBase, Node};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node: &Node) -> &'static str {
    match node {
        Node::Grid { .. } => "▦",
        Node::Row { .. } => "↔",
        Node::Cluster { .. } => "⋯",
        Node::Bracketed { .. } => "⟮",
        Node::Identifier { .. } => "𝑥",
        Node::Operator { .. } => "±",
        Node::Text { .. } => "¶",
        Node::Number { .. } => "#",
        Node::Fraction { .. } => "⁄",
        Node::Scripted { .. } => "⌃",
        Node::Root { .. } => "√",
        Node::Limits { .. } => "∑",
        Node::Overbrace { .. } => "⏞",
        Node::Underbrace { .. } => "⏟",
    }
}

fn label(node: &Node) -> String {
    match node {
        Node::Grid { rows } => format!("{} rows", rows.len()),
        Node::Row { elements } | Node::Cluster { elements } => {
            format!("{} elements", elements.len())
        }
        Node::Bracketed { left, right, .. } => format!("{} {}", left, right),
        Node::Identifier { symbol } | Node::Operator { symbol } => symbol.clone(),
        Node::Text { text } => text.clone(),
        Node::Number { value } => value.clone(),
        Node::Fraction { .. } => "fraction".to_string(),
        Node::Scripted {
            subscript,
            superscript,
            ..
        } => match (subscript.is_some(), superscript.is_some()) {
            (true, true) => "sub sup",
            (true, false) => "sub",
            (false, true) => "sup",
            (false, false) => "bare",
        }
        .to_string(),
        Node::Root { index, .. } => {
            if index.is_some() { "root" } else { "sqrt" }.to_string()
        }
        Node::Limits { base, .. } => match base {
            LimitsBase::Glyph(glyph) => glyph.clone(),
            LimitsBase::Node(_) => "nested".to_string(),
        },
        Node::Overbrace { .. } => "over".to_string(),
        Node::Underbrace { .. } => "under".to_string(),
    }
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(node),
        truncate(&label(node), 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    format_children(node, &child_prefix, output);
}

fn format_children(node: &Node, prefix: &str, output: &mut String) {
    let children = node.children();
    let child_count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        format_node(child, prefix, i == child_count - 1, output);
    }
}

pub fn to_treeviz_str(tree: &Node) -> String {
    let mut output = format!("{} {}\n", get_icon(tree), truncate(&label(tree), 30));
    format_children(tree, "", &mut output);
    output
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
