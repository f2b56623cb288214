//! Individual transformation stages
//!
//! Each stage wraps one step of the compiler and implements [`Runnable`].

use crate::math::ast::Node;
use crate::math::layout::layout;
use crate::math::parsing::parse;
use crate::math::preprocess::{preprocess_with, DEFAULT_TAB_WIDTH};
use crate::math::serializer::write_markup;
use crate::math::transforms::Runnable;
use crate::math::CompileOptions;

/// Tab expansion, brace annotations and newline folding.
pub struct Preprocess {
    tab_width: usize,
}

impl Preprocess {
    pub fn new() -> Self {
        Self::with_tab_width(DEFAULT_TAB_WIDTH)
    }

    pub fn with_tab_width(tab_width: usize) -> Self {
        Self { tab_width }
    }
}

impl Default for Preprocess {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for Preprocess {
    fn run(&self, input: String) -> String {
        preprocess_with(&input, self.tab_width)
    }
}

/// Source text to an unlaid-out tree.
pub struct Parse;

impl Parse {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Parse {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Node> for Parse {
    fn run(&self, input: String) -> Node {
        parse(&input)
    }
}

/// All layout passes, in order.
pub struct Layout;

impl Layout {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Node, Node> for Layout {
    fn run(&self, mut input: Node) -> Node {
        layout(&mut input);
        input
    }
}

/// Tree to MathML.
pub struct Serialize {
    options: CompileOptions,
}

impl Serialize {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }
}

impl Runnable<Node, String> for Serialize {
    fn run(&self, input: Node) -> String {
        write_markup(&input, &self.options)
    }
}
