//! Layout engine
//!
//! The parser only knows about sequences. Layout turns flat runs of siblings
//! into the structures they spell (`x_1` into a subscript, `a/b` into a
//! fraction, ...) with an ordered list of passes. Each pass is one pre-order
//! walk over the whole tree that rewrites the nodes it recognizes in place.
//! Order matters: ranges expect scripts to be folded already, roots expect
//! ranges, and so on.
//!
//! A Row or Cluster that a pass reduces to one element is replaced by that
//! element before the walk descends, so later passes see the folded node
//! directly.

mod braces;
mod fractions;
mod operators;
mod ranges;
mod roots;
mod scripts;

pub use braces::BracePass;
pub use fractions::FractionPass;
pub use operators::{InvisibleProductPass, OperatorMeaningPass, OperatorSuperscriptPass};
pub use ranges::RangePass;
pub use roots::RootPass;
pub use scripts::{ExponentPass, SubscriptPass};

use crate::math::ast::{walk_mut, Node};
use log::trace;
use once_cell::sync::Lazy;

/// One tree rewrite.
pub trait LayoutPass: Send + Sync {
    fn name(&self) -> &'static str;

    /// Rewrite a single node. Its children are walked afterwards.
    fn visit(&self, node: &mut Node);

    /// Run this pass over a whole tree.
    fn apply(&self, tree: &mut Node) {
        walk_mut(tree, &mut |node: &mut Node| {
            self.visit(node);
            node.collapse_singleton();
        });
    }
}

/// The standard passes, in the order they must run.
pub static PASSES: Lazy<Vec<Box<dyn LayoutPass>>> = Lazy::new(|| {
    vec![
        Box::new(InvisibleProductPass),
        Box::new(SubscriptPass),
        Box::new(ExponentPass),
        Box::new(RangePass),
        Box::new(RootPass),
        Box::new(FractionPass),
        Box::new(OperatorMeaningPass),
        Box::new(OperatorSuperscriptPass),
        Box::new(BracePass),
    ]
});

/// Fold a freshly parsed tree into its final shape.
pub fn layout(tree: &mut Node) {
    for pass in PASSES.iter() {
        trace!("layout pass: {}", pass.name());
        pass.apply(tree);
    }
}
