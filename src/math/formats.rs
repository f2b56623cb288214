//! Output formats for a laid-out tree
//!
//! MathML is the real output. The other formats exist to inspect what the
//! parser and the layout passes produced:
//! - treeviz: one line per node, with icons
//! - json / yaml: the tree as data, via serde

pub mod registry;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};

use crate::math::ast::Node;
use crate::math::serializer::write_markup;
use crate::math::{CompileOptions, DisplayMode};

/// MathML for one display mode.
pub struct MathmlFormatter {
    name: &'static str,
    options: CompileOptions,
}

impl MathmlFormatter {
    pub fn inline() -> Self {
        Self::with_options(DisplayMode::Inline, &CompileOptions::default())
    }

    pub fn block() -> Self {
        Self::with_options(DisplayMode::Block, &CompileOptions::default())
    }

    /// Formatter for `mode` that otherwise writes the way `options` asks.
    pub fn with_options(mode: DisplayMode, options: &CompileOptions) -> Self {
        let name = match mode {
            DisplayMode::Inline => "mathml",
            DisplayMode::Block => "mathml-block",
        };
        Self {
            name,
            options: CompileOptions {
                mode,
                ..options.clone()
            },
        }
    }
}

impl Formatter for MathmlFormatter {
    fn name(&self) -> &str {
        self.name
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(write_markup(tree, &self.options))
    }

    fn description(&self) -> &str {
        match self.options.mode {
            DisplayMode::Inline => "MathML with an inline <math> root",
            DisplayMode::Block => "MathML with a block <math> root",
        }
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(tree)?)
    }

    fn description(&self) -> &str {
        "The tree as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        Ok(serde_yaml::to_string(tree)?)
    }

    fn description(&self) -> &str {
        "The tree as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mathml_formatters_differ_only_in_root() {
        let tree = Node::identifier("x");
        assert_eq!(
            MathmlFormatter::inline().serialize(&tree).unwrap(),
            r#"<math display="inline"><mi>x</mi></math>"#
        );
        assert_eq!(
            MathmlFormatter::block().serialize(&tree).unwrap(),
            r#"<math display="block"><mi>x</mi></math>"#
        );
    }

    #[test]
    fn mathml_formatter_keeps_its_mode_but_takes_pretty() {
        let options = CompileOptions::new(DisplayMode::Inline).pretty(true);
        let formatter = MathmlFormatter::with_options(DisplayMode::Block, &options);
        assert_eq!(formatter.name(), "mathml-block");
        assert_eq!(
            formatter.serialize(&Node::identifier("x")).unwrap(),
            write_markup(
                &Node::identifier("x"),
                &CompileOptions::new(DisplayMode::Block).pretty(true)
            )
        );
    }

    #[test]
    fn json_tags_nodes_by_kind() {
        let json = JsonFormatter.serialize(&Node::number("42")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "number");
        assert_eq!(value["value"], "42");
    }

    #[test]
    fn yaml_tags_nodes_by_kind() {
        let yaml = YamlFormatter.serialize(&Node::identifier("speed")).unwrap();
        assert!(yaml.contains("kind: identifier"));
        assert!(yaml.contains("symbol: speed"));
    }
}
