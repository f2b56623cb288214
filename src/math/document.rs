//! Notation embedded in prose
//!
//! A host document marks notation with a paired delimiter (`###` by default).
//! Text between a pair may hold several formulas separated by blank lines;
//! each is compiled as a block and wrapped in a `<div>`. Prose outside the
//! delimiters passes through untouched, and an unpaired trailing delimiter
//! treats the rest of the text as notation.

use crate::math::{compile_with, CompileOptions, DisplayMode};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(&'a str),
    Notation(&'a str),
}

/// Split `text` into alternating prose and notation regions.
pub fn segments<'a>(text: &'a str, delimiter: &str) -> Vec<Segment<'a>> {
    if delimiter.is_empty() {
        return vec![Segment::Prose(text)];
    }
    text.split(delimiter)
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 0 {
                Segment::Prose(part)
            } else {
                Segment::Notation(part)
            }
        })
        .collect()
}

/// The formulas inside one notation region, empty ones dropped.
pub fn blocks(notation: &str) -> impl Iterator<Item = &str> {
    notation.split("\n\n").filter(|block| !block.is_empty())
}

/// Replace every delimited region with its compiled blocks.
pub fn render_document(text: &str, delimiter: &str, options: &CompileOptions) -> String {
    let options = CompileOptions {
        mode: DisplayMode::Block,
        ..options.clone()
    };

    let mut output = String::with_capacity(text.len());
    for segment in segments(text, delimiter) {
        match segment {
            Segment::Prose(prose) => output.push_str(prose),
            Segment::Notation(notation) => {
                for block in blocks(notation) {
                    debug!("rendering block {:?}", block);
                    output.push_str("<div>");
                    output.push_str(&compile_with(block, &options));
                    output.push_str("</div>");
                }
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_without_delimiters_is_untouched() {
        let text = "no math here\n";
        assert_eq!(render_document(text, "###", &CompileOptions::default()), text);
    }

    #[test]
    fn delimited_block_becomes_a_div() {
        let rendered = render_document("see ###x_1### here", "###", &CompileOptions::default());
        assert_eq!(
            rendered,
            r#"see <div><math display="block"><msub><mi>x</mi><mn>1</mn></msub></math></div> here"#
        );
    }

    #[test]
    fn blank_lines_split_blocks() {
        let rendered = render_document("###a\n\nb###", "###", &CompileOptions::default());
        assert_eq!(
            rendered,
            concat!(
                r#"<div><math display="block"><mi>a</mi></math></div>"#,
                r#"<div><math display="block"><mi>b</mi></math></div>"#
            )
        );
    }

    #[test]
    fn empty_blocks_are_skipped() {
        assert_eq!(render_document("a######b", "###", &CompileOptions::default()), "ab");
        assert_eq!(blocks("\n\nx\n\n").collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn custom_delimiter() {
        assert_eq!(
            segments("p $$q$$ r", "$$"),
            vec![
                Segment::Prose("p "),
                Segment::Notation("q"),
                Segment::Prose(" r")
            ]
        );
        assert_eq!(segments("p", ""), vec![Segment::Prose("p")]);
    }
}
