//! Property-based tests for the whole compiler
//!
//! These check structural guarantees over arbitrary input rather than exact
//! markup: compilation never fails, layout leaves no one-element groups,
//! brackets around an operand don't change the result, and brace annotations
//! can always be undone.

use mightymath::math::ast::Node;
use mightymath::math::preprocess::rewrite_annotations;
use mightymath::math::transforms::standard::STRING_TO_LAYOUT;
use mightymath::{compile, DisplayMode};
use proptest::prelude::*;

fn has_singleton_group(node: &Node) -> bool {
    let singleton = matches!(
        node,
        Node::Row { elements } | Node::Cluster { elements } if elements.len() == 1
    );
    singleton || node.children().into_iter().any(has_singleton_group)
}

/// One letter or a short number: something every structural operator accepts.
fn operand() -> impl Strategy<Value = String> {
    prop_oneof!["[a-uw-z]", "[0-9]{1,3}"]
}

fn arrow(comment: &str, dashes: usize) -> String {
    format!("<{}{}{}>", "-".repeat(dashes), comment, "-".repeat(dashes))
}

proptest! {
    #[test]
    fn compile_is_total(source in r#"[a-z0-9 +\-*/^_().,;:<>|\[\]{}"'!=~$@\\\n\t]{0,40}"#) {
        let markup = compile(&source, DisplayMode::Inline);
        prop_assert!(markup.starts_with(r#"<math display="inline">"#));
        prop_assert!(markup.ends_with("</math>"));
        prop_assert_eq!(markup.matches("<mrow>").count(), markup.matches("</mrow>").count());
    }

    #[test]
    fn layout_leaves_no_singleton_groups(source in r#"[a-z0-9 +\-*/^_().;\[\]]{0,30}"#) {
        let tree = STRING_TO_LAYOUT.run(source);
        prop_assert!(!has_singleton_group(&tree));
    }

    #[test]
    fn brackets_around_operands_change_nothing(left in operand(), right in operand()) {
        let bare = compile(&format!("{}/{}", left, right), DisplayMode::Inline);
        let bracketed = compile(&format!("({})/({})", left, right), DisplayMode::Inline);
        prop_assert_eq!(bare, bracketed);

        // Scripts unwrap what they attach, not the base.
        for op in ["_", "^"] {
            let bare = compile(&format!("{}{}{}", left, op, right), DisplayMode::Inline);
            let bracketed = compile(&format!("{}{}({})", left, op, right), DisplayMode::Inline);
            prop_assert_eq!(bare, bracketed);
        }
        let bare = compile(&format!("sqrt {}", right), DisplayMode::Inline);
        let bracketed = compile(&format!("sqrt({})", right), DisplayMode::Inline);
        prop_assert_eq!(bare, bracketed);
    }

    #[test]
    fn brace_insertions_revert_to_the_original_line(
        target in "[a-z][a-z +]{0,29}",
        lead in 0usize..12,
        gap in 1usize..6,
        first in "[a-z]{0,4}",
        second in "[a-z]{0,4}",
        dashes in 2usize..4,
    ) {
        let arrows = format!(
            "{}{}{}{}",
            " ".repeat(lead),
            arrow(&first, dashes),
            " ".repeat(gap),
            arrow(&second, dashes)
        );
        let rewrite = rewrite_annotations(&format!("{}\n{}", target, arrows));

        let mut line = rewrite.lines[0].clone();
        for insertion in rewrite.insertions.iter().rev() {
            line = insertion.revert(&line);
        }
        prop_assert_eq!(line, target);
    }
}
