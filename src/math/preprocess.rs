//! Source normalization and brace annotations
//!
//! Before parsing, tabs are expanded, carriage returns dropped and ASCII-art
//! arrow lines turned into inline pseudo-calls. Authors label part of an
//! expression by drawing an arrow over or under the columns it occupies:
//!
//! ```text
//! a + b + c
//!     <-- tail -->
//! ```
//!
//! becomes `a + underbrace(tail;b + c)`. An arrow line that opens the document
//! or follows a blank line labels the next expression line from above
//! (`overbrace`); any other arrow line labels the line before it (`underbrace`).
//! Stacked arrow lines share the decision of the first one in the stack.
//!
//! Only the marker columns matter. The braced span on the target line is the
//! column range from the first `<` to the last `>` of the arrow, clamped to the
//! line. Annotations are applied widest first so nested labels end up nested,
//! and every pending annotation on the same line is shifted past each
//! insertion so it keeps addressing the original columns.
//!
//! Once all lines are rewritten, arrow lines are blanked and every line break
//! is folded into a single space. A blanked line between two expression lines
//! therefore leaves two blanks behind, which the parser reads as a cell
//! separator.
//!
//! An arrow with no comment still draws a brace; its label is the empty
//! quoted identifier `''` so the bracket keeps both of its rows.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Tabs expand to this many spaces unless configured otherwise.
pub const DEFAULT_TAB_WIDTH: usize = 2;

static ARROW_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*<-{2,}.*-{2,}>\s*$").unwrap());

static ARROW_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<-{2,}(.*?)-{2,}>").unwrap());

const CLOSE: char = ')';

/// Stands in for a missing comment; an empty first row would be elided.
const EMPTY_COMMENT: &str = "''";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceKind {
    Over,
    Under,
}

impl BraceKind {
    /// Pseudo-operator spelling understood by the parser.
    pub fn label(self) -> &'static str {
        match self {
            BraceKind::Over => "overbrace",
            BraceKind::Under => "underbrace",
        }
    }
}

/// One arrow span, addressed in char columns of its target line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: BraceKind,
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub comment: String,
}

impl Annotation {
    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Record of one applied annotation, enough to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub line: usize,
    /// Braced span in the line as it was just before this insertion.
    pub start: usize,
    pub end: usize,
    pub prefix: String,
}

impl Insertion {
    /// Undo this insertion on the line as it was right after applying it.
    pub fn revert(&self, line: &str) -> String {
        let mut chars: Vec<char> = line.chars().collect();
        let prefix_len = self.prefix.chars().count();
        let close = self.end + prefix_len;
        if close < chars.len() {
            chars.remove(close);
        }
        let prefix_end = (self.start + prefix_len).min(chars.len());
        chars.drain(self.start.min(prefix_end)..prefix_end);
        chars.into_iter().collect()
    }
}

/// Result of rewriting every annotation in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// All lines, arrow lines included, with targets rewritten.
    pub lines: Vec<String>,
    pub arrow_lines: BTreeSet<usize>,
    /// In application order.
    pub insertions: Vec<Insertion>,
}

impl Rewrite {
    /// All lines joined with newlines, arrow lines left empty.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                if self.arrow_lines.contains(&index) {
                    ""
                } else {
                    line.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Normalize a source for the parser with the default tab width.
pub fn preprocess(source: &str) -> String {
    preprocess_with(source, DEFAULT_TAB_WIDTH)
}

pub fn preprocess_with(source: &str, tab_width: usize) -> String {
    let expanded = expand_tabs(&source.replace('\r', ""), tab_width);
    let folded = rewrite_annotations(&expanded).text().replace('\n', " ");
    debug!("preprocessed source: {:?}", folded);
    folded
}

pub fn expand_tabs(source: &str, tab_width: usize) -> String {
    source.replace('\t', &" ".repeat(tab_width))
}

pub fn is_arrow_line(line: &str) -> bool {
    ARROW_LINE.is_match(line)
}

fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count()
}

/// Which line an arrow line labels, and from which side.
fn annotation_target(lines: &[&str], index: usize) -> Option<(BraceKind, usize)> {
    let mut first = index;
    while first > 0 && is_arrow_line(lines[first - 1]) {
        first -= 1;
    }

    if first == 0 || lines[first - 1].trim().is_empty() {
        let target = (index + 1..lines.len())
            .find(|&i| !lines[i].trim().is_empty() && !is_arrow_line(lines[i]))?;
        Some((BraceKind::Over, target))
    } else {
        Some((BraceKind::Under, first - 1))
    }
}

/// Every arrow span in the document, in document order.
pub fn find_annotations(lines: &[&str]) -> Vec<Annotation> {
    let mut annotations = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if !is_arrow_line(line) {
            continue;
        }
        let Some((kind, target)) = annotation_target(lines, index) else {
            trace!("arrow line {} has nothing to label", index);
            continue;
        };
        for caps in ARROW_SPAN.captures_iter(line) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            annotations.push(Annotation {
                kind,
                line: target,
                start: char_column(line, whole.start()),
                end: char_column(line, whole.end()),
                comment: inner.as_str().trim().to_string(),
            });
        }
    }
    annotations
}

fn shift_start(position: usize, start: usize, end: usize, prefix: usize, total: usize) -> usize {
    if position < start {
        position
    } else if position < end {
        position + prefix
    } else {
        position + total
    }
}

fn shift_end(position: usize, start: usize, end: usize, prefix: usize, total: usize) -> usize {
    if position <= start {
        position
    } else if position <= end {
        position + prefix
    } else {
        position + total
    }
}

/// Apply all annotations found in `text`, widest span first.
pub fn rewrite_annotations(text: &str) -> Rewrite {
    let originals: Vec<&str> = text.split('\n').collect();
    let arrow_lines: BTreeSet<usize> = originals
        .iter()
        .enumerate()
        .filter(|(_, line)| is_arrow_line(line))
        .map(|(index, _)| index)
        .collect();

    let mut annotations = find_annotations(&originals);
    annotations.sort_by(|a, b| b.width().cmp(&a.width()));

    let mut lines: Vec<Vec<char>> = originals.iter().map(|line| line.chars().collect()).collect();
    let mut insertions = Vec::new();

    for index in 0..annotations.len() {
        let annotation = annotations[index].clone();
        let line = &mut lines[annotation.line];
        let start = annotation.start.min(line.len());
        let end = annotation.end.min(line.len());
        if start >= end {
            trace!(
                "{} '{}' falls past the end of line {}",
                annotation.kind.label(),
                annotation.comment,
                annotation.line
            );
            continue;
        }

        let comment = if annotation.comment.is_empty() {
            EMPTY_COMMENT
        } else {
            annotation.comment.as_str()
        };
        let prefix = format!("{}({};", annotation.kind.label(), comment);
        let prefix_len = prefix.chars().count();
        line.insert(end, CLOSE);
        let tail = line.split_off(start);
        line.extend(prefix.chars());
        line.extend(tail);
        trace!(
            "{} '{}' on line {} at {}..{}",
            annotation.kind.label(),
            annotation.comment,
            annotation.line,
            start,
            end
        );

        let total = prefix_len + 1;
        for pending in annotations[index + 1..]
            .iter_mut()
            .filter(|pending| pending.line == annotation.line)
        {
            pending.start = shift_start(pending.start, start, end, prefix_len, total);
            pending.end = shift_end(pending.end, start, end, prefix_len, total);
        }

        insertions.push(Insertion {
            line: annotation.line,
            start,
            end,
            prefix,
        });
    }

    Rewrite {
        lines: lines.into_iter().map(|line| line.into_iter().collect()).collect(),
        arrow_lines,
        insertions,
    }
}
