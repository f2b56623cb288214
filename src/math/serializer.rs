//! MathML writer
//!
//! Walks a laid-out tree and emits one element per node. Every render call gets
//! the current nesting depth; with `pretty` on, each element starts on its own
//! line indented by that depth, otherwise everything is written back to back.
//! Pretty printing never changes which elements are emitted.

use crate::math::ast::{GridRow, LimitsBase, Node};
use crate::math::symbols::{DIFFERENTIAL, OVERBRACE, SUBSCRIPT, UNDERBRACE};
use crate::math::{CompileOptions, DisplayMode};

/// Escape the characters that would break markup in raw source text.
pub fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Render a tree inside a `<math>` root.
pub fn write_markup(tree: &Node, options: &CompileOptions) -> String {
    let mut writer = MarkupWriter::new(options.pretty, &options.indent);
    writer.write_root(tree, options.mode);
    writer.finish()
}

pub struct MarkupWriter<'a> {
    pretty: bool,
    indent: &'a str,
    output: String,
}

impl<'a> MarkupWriter<'a> {
    pub fn new(pretty: bool, indent: &'a str) -> Self {
        Self {
            pretty,
            indent,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, markup: &str, nesting: usize) {
        if self.pretty {
            self.output.push_str(&self.indent.repeat(nesting));
            self.output.push_str(markup);
            self.output.push('\n');
        } else {
            self.output.push_str(markup);
        }
    }

    fn open(&mut self, tag: &str, nesting: usize) {
        self.line(&format!("<{}>", tag), nesting);
    }

    fn close(&mut self, tag: &str, nesting: usize) {
        self.line(&format!("</{}>", tag), nesting);
    }

    fn leaf(&mut self, tag: &str, content: &str, nesting: usize) {
        self.line(&format!("<{tag}>{content}</{tag}>"), nesting);
    }

    /// Wrap `children` in one element.
    fn element(&mut self, tag: &str, children: &[&Node], nesting: usize) {
        self.open(tag, nesting);
        for child in children {
            self.write_node(child, nesting + 1);
        }
        self.close(tag, nesting);
    }

    pub fn write_root(&mut self, tree: &Node, mode: DisplayMode) {
        self.line(&format!("<math display=\"{}\">", mode.as_str()), 0);
        self.write_node(tree, 1);
        self.close("math", 0);
    }

    pub fn write_node(&mut self, node: &Node, nesting: usize) {
        match node {
            Node::Grid { rows } if rows.is_empty() => self.line("<mrow></mrow>", nesting),
            Node::Grid { rows } => self.write_grid(rows, nesting),
            Node::Row { elements } | Node::Cluster { elements } => match elements.as_slice() {
                [] => self.line("<mrow></mrow>", nesting),
                [only] => self.write_node(only, nesting),
                _ => {
                    let children: Vec<&Node> = elements.iter().collect();
                    self.element("mrow", &children, nesting);
                }
            },
            Node::Bracketed {
                left,
                right,
                contents,
            } => {
                self.open("mrow", nesting);
                if !left.is_empty() {
                    self.line(&format!("<mo fence=\"true\">{}</mo>", left), nesting + 1);
                }
                if let Some(contents) = contents {
                    self.write_node(contents, nesting + 1);
                }
                if !right.is_empty() {
                    self.line(&format!("<mo fence=\"true\">{}</mo>", right), nesting + 1);
                }
                self.close("mrow", nesting);
            }
            Node::Identifier { symbol } => {
                let mut chars = symbol.chars();
                let capital = matches!(
                    (chars.next(), chars.next()),
                    (Some(c), None) if c.is_ascii_uppercase()
                );
                if capital {
                    self.line(&format!("<mi mathvariant=\"normal\">{}</mi>", symbol), nesting);
                } else {
                    self.leaf("mi", symbol, nesting);
                }
            }
            Node::Operator { symbol } => match symbol.as_str() {
                DIFFERENTIAL => {
                    self.line("<mspace width=\"thinmathspace\" /><mi>d</mi>", nesting)
                }
                SUBSCRIPT => self.line("<mspace width=\"1ex\" />", nesting),
                _ => self.leaf("mo", symbol, nesting),
            },
            Node::Text { text } => {
                let text = text.replace("\\u", "&micro;");
                self.leaf("mtext", &format!("&thinsp;{}&thinsp;", text), nesting);
            }
            Node::Number { value } => self.leaf("mn", value, nesting),
            Node::Fraction {
                numerator,
                denominator,
            } => self.element(
                "mfrac",
                &[numerator.as_ref(), denominator.as_ref()],
                nesting,
            ),
            Node::Scripted {
                base,
                subscript,
                superscript,
            } => match (subscript, superscript) {
                (Some(sub), Some(sup)) => self.element(
                    "msubsup",
                    &[base.as_ref(), sub.as_ref(), sup.as_ref()],
                    nesting,
                ),
                (Some(sub), None) => {
                    self.element("msub", &[base.as_ref(), sub.as_ref()], nesting)
                }
                (None, Some(sup)) => {
                    self.element("msup", &[base.as_ref(), sup.as_ref()], nesting)
                }
                (None, None) => self.write_node(base, nesting),
            },
            Node::Root { radicand, index } => match index {
                Some(index) => {
                    self.element("mroot", &[radicand.as_ref(), index.as_ref()], nesting)
                }
                None => self.element("msqrt", &[radicand.as_ref()], nesting),
            },
            Node::Limits { base, lower, upper } => {
                let tag = if upper.is_some() { "munderover" } else { "munder" };
                self.open(tag, nesting);
                match base {
                    LimitsBase::Glyph(glyph) => self.line(
                        &format!("<mo largeop=\"true\">{}</mo>", glyph),
                        nesting + 1,
                    ),
                    LimitsBase::Node(inner) => self.write_node(inner, nesting + 1),
                }
                self.write_node(lower, nesting + 1);
                if let Some(upper) = upper {
                    self.write_node(upper, nesting + 1);
                }
                self.close(tag, nesting);
            }
            Node::Overbrace { base, comment } => {
                self.write_brace("mover", OVERBRACE, base, comment, nesting)
            }
            Node::Underbrace { base, comment } => {
                self.write_brace("munder", UNDERBRACE, base, comment, nesting)
            }
        }
    }

    fn write_grid(&mut self, rows: &[GridRow], nesting: usize) {
        self.open("mtable", nesting);
        for row in rows {
            self.open("mtr", nesting + 1);
            for cell in &row.cells {
                self.element("mtd", &[&cell.row], nesting + 2);
            }
            self.close("mtr", nesting + 1);
        }
        self.close("mtable", nesting);
    }

    /// The brace sits directly on the base; the comment goes on the outside.
    fn write_brace(&mut self, tag: &str, brace: &str, base: &Node, comment: &Node, nesting: usize) {
        self.open(tag, nesting);
        self.open(tag, nesting + 1);
        self.write_node(base, nesting + 2);
        self.leaf("mo", brace, nesting + 2);
        self.close(tag, nesting + 1);
        self.write_node(comment, nesting + 1);
        self.close(tag, nesting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &Node) -> String {
        let mut writer = MarkupWriter::new(false, "  ");
        writer.write_node(node, 0);
        writer.finish()
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_text("a<b & c>d"), "a&lt;b &amp; c&gt;d");
    }

    #[test]
    fn capital_letters_are_upright() {
        assert_eq!(
            render(&Node::identifier("A")),
            r#"<mi mathvariant="normal">A</mi>"#
        );
        assert_eq!(render(&Node::identifier("a")), "<mi>a</mi>");
        assert_eq!(render(&Node::identifier("AB")), "<mi>AB</mi>");
    }

    #[test]
    fn differential_and_blank_subscript_are_spacing() {
        assert_eq!(
            render(&Node::operator(DIFFERENTIAL)),
            r#"<mspace width="thinmathspace" /><mi>d</mi>"#
        );
        assert_eq!(
            render(&Node::operator(SUBSCRIPT)),
            r#"<mspace width="1ex" />"#
        );
    }

    #[test]
    fn text_gets_thin_spaces_and_micro() {
        assert_eq!(
            render(&Node::text("5 \\um")),
            "<mtext>&thinsp;5 &micro;m&thinsp;</mtext>"
        );
    }

    #[test]
    fn brackets_are_fences() {
        let node = Node::bracketed("(", ")", Some(Node::identifier("x"))).unwrap();
        assert_eq!(
            render(&node),
            r#"<mrow><mo fence="true">(</mo><mi>x</mi><mo fence="true">)</mo></mrow>"#
        );
    }

    #[test]
    fn limits_glyph_is_a_large_operator() {
        let node = Node::Limits {
            base: LimitsBase::Glyph("&sum;".into()),
            lower: Box::new(Node::number("1")),
            upper: None,
        };
        assert_eq!(
            render(&node),
            r#"<munder><mo largeop="true">&sum;</mo><mn>1</mn></munder>"#
        );
    }

    #[test]
    fn pretty_output_indents_by_depth() {
        let tree = Node::Fraction {
            numerator: Box::new(Node::number("1")),
            denominator: Box::new(Node::number("2")),
        };
        let options = CompileOptions::new(DisplayMode::Block).pretty(true);
        assert_eq!(
            write_markup(&tree, &options),
            "<math display=\"block\">\n  <mfrac>\n    <mn>1</mn>\n    <mn>2</mn>\n  </mfrac>\n</math>\n"
        );
    }

    #[test]
    fn empty_grid_is_an_empty_group() {
        let options = CompileOptions::new(DisplayMode::Block);
        assert_eq!(
            write_markup(&Node::empty_grid(), &options),
            r#"<math display="block"><mrow></mrow></math>"#
        );
    }
}
