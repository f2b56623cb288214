//! Standard transform definitions
//!
//! Pre-built pipelines for the common cases, defined as statics with
//! `once_cell::sync::Lazy`. The statics use the default tab width; pipelines
//! that depend on per-call options are built by [`tree_pipeline`] and
//! [`compile_pipeline`] instead.

use crate::math::ast::Node;
use crate::math::transforms::stages::{Layout, Parse, Preprocess, Serialize};
use crate::math::transforms::Transform;
use crate::math::CompileOptions;
use once_cell::sync::Lazy;

/// Type alias for pipelines that end in a tree
pub type TreeTransform = Transform<String, Node>;

/// Raw source to parser-ready text.
///
/// ```rust
/// use mightymath::math::transforms::standard::PREPROCESS;
///
/// assert_eq!(PREPROCESS.run("a\nb".to_string()), "a b");
/// ```
pub static PREPROCESS: Lazy<Transform<String, String>> =
    Lazy::new(|| Transform::from_fn(|s: String| s).then(Preprocess::new()));

/// Raw source to the tree exactly as parsed, before any layout pass.
pub static STRING_TO_TREE: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(|s: String| s)
        .then_transform(&*PREPROCESS)
        .then(Parse::new())
});

/// Raw source to the final, laid-out tree.
pub static STRING_TO_LAYOUT: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(|s: String| s)
        .then_transform(&*STRING_TO_TREE)
        .then(Layout::new())
});

/// Raw source to the laid-out tree, expanding tabs per `options`.
pub fn tree_pipeline(options: &CompileOptions) -> TreeTransform {
    Transform::from_fn(|s: String| s)
        .then(Preprocess::with_tab_width(options.tab_width))
        .then(Parse::new())
        .then(Layout::new())
}

/// Raw source to MathML, formatted per `options`.
pub fn compile_pipeline(options: &CompileOptions) -> Transform<String, String> {
    tree_pipeline(options).then(Serialize::new(options.clone()))
}
