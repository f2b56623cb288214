//! Recursive-descent parser
//!
//! Grammar, outermost first:
//!
//! ```text
//! Grid    := GridRow (';' GridRow)*
//! GridRow := Cell ('  ' Cell)*          two or more blanks separate cells
//! Cell    := Row
//! Row     := (Cluster | ' ' | '..')*    single blanks are skipped
//! Cluster := atom*                      no blanks inside
//! atom    := Bracketed | Number | Text | Identifier | Operator | unrecognized
//! ```
//!
//! Each rule returns `None` when it matched nothing, and callers treat that as
//! the end of their own repetition. The grammar is total: at top level every
//! character ends up in some node.

use crate::math::ast::{Cell, GridRow, Node};
use crate::math::lexing::{
    at_expected_closer, match_close_bracket, match_identifier, match_number,
    match_open_bracket, match_operator, match_range_separator, match_text, match_unrecognized,
    Cursor,
};
use crate::math::symbols::{is_postfix, RANGE};

type Classifier = fn(&mut Cursor) -> Option<Node>;

/// Tried first regardless of parser state.
const UNAMBIGUOUS: &[Classifier] = &[parse_bracketed, match_number, match_text];
/// In term position a letter is a variable before it is an operator keyword.
const TERM_FIRST: &[Classifier] = &[match_identifier, match_operator, match_unrecognized];
const OPERATOR_FIRST: &[Classifier] = &[match_operator, match_identifier, match_unrecognized];

/// Parse a whole (preprocessed) source into an unlaid-out tree.
pub fn parse(source: &str) -> Node {
    let mut cursor = Cursor::new(source);
    parse_grid(&mut cursor)
}

/// Always produces a node; no rows at all gives an empty grid.
pub fn parse_grid(cursor: &mut Cursor) -> Node {
    let mut rows = Vec::new();
    while !cursor.at_end() {
        if cursor.eat(";") {
            cursor.expect_term = true;
        } else if let Some(row) = parse_grid_row(cursor) {
            rows.push(row);
        } else {
            break;
        }
    }
    Node::grid(rows)
}

pub fn parse_grid_row(cursor: &mut Cursor) -> Option<GridRow> {
    let mut cells = Vec::new();
    while !cursor.at_end() {
        if cursor.eat("  ") {
            while cursor.peek() == Some(' ') {
                cursor.advance(1);
            }
            cursor.expect_term = true;
        } else if let Some(cell) = parse_cell(cursor) {
            cells.push(cell);
        } else {
            break;
        }
    }
    (!cells.is_empty()).then_some(GridRow { cells })
}

pub fn parse_cell(cursor: &mut Cursor) -> Option<Cell> {
    parse_row(cursor).map(|row| Cell { row })
}

pub fn parse_row(cursor: &mut Cursor) -> Option<Node> {
    let mut elements = Vec::new();
    while !cursor.at_end() {
        if cursor.peek() == Some(' ') && cursor.peek_at(1) != Some(' ') {
            cursor.advance(1);
        } else if match_range_separator(cursor) {
            elements.push(Node::operator(RANGE));
            cursor.expect_term = true;
        } else if let Some(cluster) = parse_cluster(cursor) {
            elements.push(cluster);
        } else {
            break;
        }
    }
    Node::row(elements)
}

pub fn parse_cluster(cursor: &mut Cursor) -> Option<Node> {
    let mut elements = Vec::new();
    while !cursor.at_end() && !at_expected_closer(cursor) {
        let start = cursor.pos();
        let classifiers = if cursor.expect_term {
            TERM_FIRST
        } else {
            OPERATOR_FIRST
        };
        let Some(atom) = UNAMBIGUOUS
            .iter()
            .chain(classifiers)
            .find_map(|classify| classify(cursor))
        else {
            break;
        };

        // `..` belongs to the enclosing row
        if atom.is_operator(RANGE) {
            cursor.set_pos(start);
            break;
        }

        cursor.expect_term = match atom.as_operator() {
            Some(symbol) => !is_postfix(symbol),
            None => false,
        };
        elements.push(atom);
    }
    Node::cluster(elements)
}

/// A delimiter pair around a nested grid. The closer found is whatever right
/// delimiter comes next, or none at all.
pub fn parse_bracketed(cursor: &mut Cursor) -> Option<Node> {
    let bracket = match_open_bracket(cursor)?;
    let outer = std::mem::replace(&mut cursor.expect_bracket, bracket.close);
    cursor.expect_term = true;

    let grid = parse_grid(cursor);
    let contents = (!grid.is_empty_grid()).then_some(grid);
    let right = match_close_bracket(cursor).unwrap_or("");

    cursor.expect_bracket = outer;
    cursor.expect_term = false;
    Node::bracketed(bracket.glyph, right, contents)
}
