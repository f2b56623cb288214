//! Lexer / classifier
//!
//! The notation is context sensitive, so there is no separate token stream. The
//! parser asks the classifiers below what the upcoming text is, given the cursor
//! and two pieces of state:
//!
//! - `expect_term`: true at the start of an expression and after any binary or
//!   prefix operator, false after a completed term. It decides whether an
//!   identifier or an operator reading is tried first, and whether `<` opens an
//!   angle bracket.
//! - `expect_bracket`: the closer of the innermost open bracket, so nested rules
//!   stop in front of it instead of eating it.
//!
//! Every classifier either consumes input and returns a leaf node, or leaves the
//! cursor where it was and returns `None`.

use crate::math::ast::Node;
use crate::math::serializer::escape_text;
use crate::math::symbols::{is_alpha, IDENTIFIERS, OPERATORS, RANGE};

/// Parse position plus the two context flags. One per compilation.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    pub expect_term: bool,
    pub expect_bracket: &'static str,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            expect_term: true,
            expect_bracket: "",
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Rewind (or jump) to a position previously read from [`Cursor::pos`].
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.chars.len());
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn rest(&self) -> &[char] {
        &self.chars[self.pos.min(self.chars.len())..]
    }

    pub fn advance(&mut self, n: usize) {
        self.set_pos(self.pos + n);
    }

    pub fn starts_with(&self, s: &str) -> bool {
        let rest = self.rest();
        let mut len = 0;
        for (i, c) in s.chars().enumerate() {
            if rest.get(i) != Some(&c) {
                return false;
            }
            len += 1;
        }
        len > 0
    }

    /// Consume `s` if the input continues with it.
    pub fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            self.advance(s.chars().count());
            true
        } else {
            false
        }
    }

    /// Chars from the cursor up to (not including) the first non-letter.
    fn alpha_run(&self) -> usize {
        self.rest().iter().take_while(|c| is_alpha(**c)).count()
    }

    fn take(&mut self, len: usize) -> String {
        let taken: String = self.rest()[..len].iter().collect();
        self.advance(len);
        taken
    }
}

/// A left delimiter, the closer it expects and the glyphs drawn for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    pub open: &'static str,
    pub close: &'static str,
    pub glyph: &'static str,
    /// Only opens in term position (`<` is otherwise less-than).
    pub term_only: bool,
}

const fn pair(open: &'static str, close: &'static str, glyph: &'static str) -> BracketPair {
    BracketPair {
        open,
        close,
        glyph,
        term_only: false,
    }
}

/// Left delimiters, in matching order. Longer spellings come before their prefixes.
pub const OPEN_BRACKETS: &[BracketPair] = &[
    pair("(", ")", "("),
    pair("[", "]", "["),
    pair("{", "}", "{"),
    pair("|_", "_|", "&lfloor;"),
    BracketPair {
        open: "<<",
        close: ">>",
        glyph: "&lAng;",
        term_only: true,
    },
    BracketPair {
        open: "<",
        close: ">",
        glyph: "&lang;",
        term_only: true,
    },
    pair("||:", ":||", "&par;"),
    pair("|:", ":|", "&mid;"),
];

/// Right delimiters and their glyphs, any of which may close any bracket.
pub const CLOSE_BRACKETS: &[(&str, &str)] = &[
    (")", ")"),
    ("]", "]"),
    ("}", "}"),
    ("_|", "&rfloor;"),
    (">>", "&rAng;"),
    (">", "&rang;"),
    (":||", "&par;"),
    (":|", "&mid;"),
];

pub fn match_open_bracket(cursor: &mut Cursor) -> Option<BracketPair> {
    let expect_term = cursor.expect_term;
    let found = OPEN_BRACKETS
        .iter()
        .find(|b| (expect_term || !b.term_only) && cursor.starts_with(b.open))
        .copied()?;
    cursor.eat(found.open);
    Some(found)
}

/// Best-effort closer: whatever right delimiter is there, expected or not.
pub fn match_close_bracket(cursor: &mut Cursor) -> Option<&'static str> {
    let (close, glyph) = CLOSE_BRACKETS
        .iter()
        .find(|(close, _)| cursor.starts_with(close))
        .copied()?;
    cursor.eat(close);
    Some(glyph)
}

/// True in front of the closer of the innermost open bracket. `)` and `]` stand
/// in for each other so half-open intervals like `(3, 5]` close normally.
pub fn at_expected_closer(cursor: &Cursor) -> bool {
    match cursor.expect_bracket {
        "" => false,
        ")" | "]" => cursor.starts_with(")") || cursor.starts_with("]"),
        closer => cursor.starts_with(closer),
    }
}

fn is_numeric_separator(c: char) -> bool {
    matches!(c, '.' | ',' | ' ')
}

/// A digit, then digits or separator-digit pairs. `1 000`, `3.14` and `1,5` are one
/// number each; a separator not followed by a digit ends it.
pub fn match_number(cursor: &mut Cursor) -> Option<Node> {
    let rest = cursor.rest();
    if !rest.first()?.is_ascii_digit() {
        return None;
    }
    let mut end = 1;
    while end < rest.len() {
        let c = rest[end];
        let continues = c.is_ascii_digit()
            || (is_numeric_separator(c) && rest.get(end + 1).is_some_and(|d| d.is_ascii_digit()));
        if !continues {
            break;
        }
        end += 1;
    }
    Some(Node::number(cursor.take(end)))
}

/// Everything between `quote` and the next one, or to the end of input when
/// the quote is never closed.
fn quoted(cursor: &mut Cursor, quote: char) -> Option<String> {
    if cursor.peek() != Some(quote) {
        return None;
    }
    cursor.advance(1);
    let len = cursor.rest().iter().take_while(|c| **c != quote).count();
    let content = cursor.take(len);
    cursor.advance(1);
    Some(content)
}

/// `"double quoted"` text.
pub fn match_text(cursor: &mut Cursor) -> Option<Node> {
    quoted(cursor, '"').map(|text| Node::text(escape_text(&text)))
}

/// `'single quoted'` identifier, for anything the dictionaries can't spell.
pub fn match_quoted_identifier(cursor: &mut Cursor) -> Option<Node> {
    quoted(cursor, '\'').map(|symbol| Node::identifier(escape_text(&symbol)))
}

/// Quoted identifier, dictionary word, lone letter, or symbolic dictionary key.
pub fn match_identifier(cursor: &mut Cursor) -> Option<Node> {
    if let Some(node) = match_quoted_identifier(cursor) {
        return Some(node);
    }
    if cursor.at_end() {
        return None;
    }

    let run = cursor.alpha_run();
    if run > 0 {
        let word: String = cursor.rest()[..run].iter().collect();
        if let Some(symbol) = IDENTIFIERS.lookup_word(&word) {
            cursor.advance(run);
            return Some(Node::identifier(symbol));
        }
        if run == 1 {
            cursor.advance(1);
            return Some(Node::identifier(word));
        }
        return None;
    }

    let (symbol, len) = IDENTIFIERS.longest_prefix(cursor.rest())?;
    cursor.advance(len);
    Some(Node::identifier(symbol))
}

/// Dictionary operator: a whole word, or the longest symbolic key.
pub fn match_operator(cursor: &mut Cursor) -> Option<Node> {
    if cursor.at_end() {
        return None;
    }

    let run = cursor.alpha_run();
    if run > 0 {
        let word: String = cursor.rest()[..run].iter().collect();
        let symbol = OPERATORS.lookup_word(&word)?;
        cursor.advance(run);
        return Some(Node::operator(symbol));
    }

    let (symbol, len) = OPERATORS.longest_prefix(cursor.rest())?;
    cursor.advance(len);
    Some(Node::operator(symbol))
}

/// Final fallback: an unknown word becomes an identifier, any other single char
/// except a blank or `;` becomes an operator.
pub fn match_unrecognized(cursor: &mut Cursor) -> Option<Node> {
    let run = cursor.alpha_run();
    if run > 0 {
        return Some(Node::identifier(cursor.take(run)));
    }
    match cursor.peek()? {
        ' ' | ';' => None,
        _ => Some(Node::operator(escape_text(&cursor.take(1)))),
    }
}

/// `..` at row scope. Never consumes the ellipsis `...`.
pub fn match_range_separator(cursor: &mut Cursor) -> bool {
    let start = cursor.pos();
    match match_operator(cursor) {
        Some(node) if node.is_operator(RANGE) => true,
        _ => {
            cursor.set_pos(start);
            false
        }
    }
}
