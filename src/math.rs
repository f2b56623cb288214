//! Main module for the notation compiler
//!
//! Layout:
//!   symbols      identifier / operator dictionaries
//!   preprocess   tab expansion, ASCII-art brace annotations, newline folding
//!   lexing       cursor + parse state and the token classifiers
//!   parsing      recursive-descent grammar (grid → row → cell → row → cluster → atom)
//!   ast          the node tree
//!   layout       ordered tree-rewrite passes
//!   serializer   MathML writer
//!   transforms   composable pipeline stages and the standard pipelines
//!   formats      output format registry (mathml, treeviz, json, yaml)
//!   document     host-document glue: find delimited blocks and splice markup back

pub mod ast;
pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod layout;
pub mod lexing;
pub mod parsing;
pub mod preprocess;
pub mod serializer;
pub mod symbols;
pub mod transforms;

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use ast::Node;
pub use layout::layout;
pub use parsing::parse;
pub use preprocess::preprocess;
pub use serializer::write_markup;

/// Whether the `<math>` root is rendered as a block or inline with prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Inline,
    #[serde(alias = "display")]
    Block,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Inline => "inline",
            DisplayMode::Block => "block",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = error::MightyMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(DisplayMode::Inline),
            "block" | "display" => Ok(DisplayMode::Block),
            other => Err(error::MightyMathError::UnknownDisplayMode(other.to_string())),
        }
    }
}

/// Knobs for a single compilation. None of them change which elements are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub mode: DisplayMode,
    /// Indent and break lines in the emitted markup.
    pub pretty: bool,
    /// Indent unit used when `pretty` is on.
    pub indent: String,
    /// Number of spaces a tab expands to before any column is measured.
    pub tab_width: usize,
}

impl CompileOptions {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Inline,
            pretty: false,
            indent: "  ".to_string(),
            tab_width: preprocess::DEFAULT_TAB_WIDTH,
        }
    }
}

/// Compile notation into a MathML fragment rooted at one `<math>` element.
///
/// Total over its input: malformed notation degrades to a literal rendering.
pub fn compile(source: &str, mode: DisplayMode) -> String {
    compile_with(source, &CompileOptions::new(mode))
}

/// The laid-out tree for `source`, before serialization.
pub fn compile_tree(source: &str, options: &CompileOptions) -> Node {
    transforms::standard::tree_pipeline(options).run(source.to_string())
}

/// Same as [`compile`], with explicit formatting options.
pub fn compile_with(source: &str, options: &CompileOptions) -> String {
    let pipeline = transforms::standard::compile_pipeline(options);
    let markup = pipeline.run(source.to_string());
    debug!("compiled {:?} -> {}", source, markup);
    markup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mode_round_trips_through_str() {
        assert_eq!("inline".parse::<DisplayMode>().unwrap(), DisplayMode::Inline);
        assert_eq!("display".parse::<DisplayMode>().unwrap(), DisplayMode::Block);
        assert_eq!(DisplayMode::Block.to_string(), "block");
        assert!("sideways".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn compile_wraps_in_math_root() {
        assert_eq!(
            compile("x", DisplayMode::Inline),
            r#"<math display="inline"><mi>x</mi></math>"#
        );
    }
}
