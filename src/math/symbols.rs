//! Symbol dictionaries
//!
//! Two tables, identifiers and operators, map notation spellings to MathML glyphs
//! or entities. Each is split on load into:
//!
//! - an alphabetic subset, matched against a whole run of letters, and
//! - a symbolic subset, matched by longest prefix at the cursor, trying the
//!   longest key length first and stopping at the first hit.
//!
//! Keys are therefore either entirely alphabetic or start with a non-letter.
//! The tables are built once and only ever read, so any number of compilations
//! can share them.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// Operator values the parser and the layout passes give structural meaning to.
pub const SUBSCRIPT: &str = "_";
pub const SUPERSCRIPT: &str = "^";
pub const FRACTION: &str = "/";
pub const RANGE: &str = "..";
pub const INVISIBLE_PRODUCT: &str = "&it;";
pub const DOT_PRODUCT: &str = "&sdot;";
pub const FACTORIAL: &str = "!";
pub const LOGICAL_NOT: &str = "&not;";
pub const LOGICAL_AND: &str = "&and;";
pub const PRIME: &str = "&prime;";
pub const PERCENT: &str = "%";
pub const ELLIPSIS: &str = "&hellip;";
pub const PLUS: &str = "+";
pub const MINUS: &str = "&minus;";
pub const ASTERISK: &str = "&lowast;";
pub const RADICAL: &str = "&radic;";
pub const OVERBRACE: &str = "&OverBrace;";
pub const UNDERBRACE: &str = "&UnderBrace;";
pub const DIFFERENTIAL: &str = "&dd;";

/// Postfix operators leave the parser expecting another operator, not a term.
pub fn is_postfix(symbol: &str) -> bool {
    matches!(symbol, PERCENT | PRIME | ELLIPSIS)
}

const IDENTIFIER_ENTRIES: &[(&str, &str)] = &[
    // Letters that double as operators become identifiers again behind a backslash.
    ("\\X", "X"),
    ("\\v", "v"),
    ("\\V", "V"),
    ("\\o", "o"),
    ("null", "&empty;"),
    ("empty", "&empty;"),
    ("inf", "&infin;"),
    ("deg", "&deg;"),
    ("degree", "&deg;"),
    ("degrees", "&deg;"),
    ("°", "&deg;"),
    ("Im", "&image;"),
    ("Re", "&real;"),
    ("aleph", "&alefsym;"),
    ("Aleph", "&alefsym;"),
    ("Alpha", "&Alpha;"),
    ("Beta", "&Beta;"),
    ("Gamma", "&Gamma;"),
    ("Delta", "&Delta;"),
    ("Epsilon", "&Epsilon;"),
    ("Zeta", "&Zeta;"),
    ("Eta", "&Eta;"),
    ("Theta", "&Theta;"),
    ("Iota", "&Iota;"),
    ("Kappa", "&Kappa;"),
    ("Lambda", "&Lambda;"),
    ("Mu", "&Mu;"),
    ("Nu", "&Nu;"),
    ("Xi", "&Xi;"),
    ("Omicron", "&Omicron;"),
    ("Pi", "&Pi;"),
    ("Rho", "&Rho;"),
    ("Sigma", "&Sigma;"),
    ("Tau", "&Tau;"),
    ("Upsilon", "&Upsilon;"),
    ("Phi", "&Phi;"),
    ("Chi", "&Chi;"),
    ("Psi", "&Psi;"),
    ("Omega", "&Omega;"),
    ("alpha", "&alpha;"),
    ("beta", "&beta;"),
    ("gamma", "&gamma;"),
    ("delta", "&delta;"),
    ("epsilon", "&epsilon;"),
    ("zeta", "&zeta;"),
    ("eta", "&eta;"),
    ("theta", "&theta;"),
    ("iota", "&iota;"),
    ("kappa", "&kappa;"),
    ("lambda", "&lambda;"),
    ("mu", "&mu;"),
    ("nu", "&nu;"),
    ("xi", "&xi;"),
    ("omicron", "&omicron;"),
    ("pi", "&pi;"),
    ("rho", "&rho;"),
    ("sigma", "&sigma;"),
    ("tau", "&tau;"),
    ("upsilon", "&upsilon;"),
    ("phi", "&phi;"),
    ("chi", "&chi;"),
    ("psi", "&psi;"),
    ("omega", "&omega;"),
    // Variant letterforms
    ("\\theta", "&thetasym;"),
    ("\\pi", "&piv;"),
    ("\\sigma", "&sigmaf;"),
    ("\\upsilon", "&upsih;"),
    ("\\phi", "&phiv;"),
    ("\\p", "&weierp;"),
];

const OPERATOR_ENTRIES: &[(&str, &str)] = &[
    // Structural: folded or re-read by the layout passes
    ("_", SUBSCRIPT),
    ("^", SUPERSCRIPT),
    ("/", FRACTION),
    (".", INVISIBLE_PRODUCT),
    ("\\.", DOT_PRODUCT),
    ("!", FACTORIAL),
    (":", "&af;"),
    ("..", RANGE),
    // Pseudo-operators
    ("sqrt", RADICAL),
    ("root", RADICAL),
    ("overbrace", OVERBRACE),
    ("underbrace", UNDERBRACE),
    // Words set upright as operators
    ("lim", "lim"),
    ("det", "det"),
    ("\\P", "P"),
    ("\\C", "C"),
    ("\\F", "F"),
    ("\\d", DIFFERENTIAL),
    ("X", "&times;"),
    ("cross", "&times;"),
    ("not", LOGICAL_NOT),
    ("¬", LOGICAL_NOT),
    ("grad", "&nabla;"),
    ("div", "&nabla;&sdot;"),
    ("curl", "&nabla;&times;"),
    ("in", "&isin;"),
    ("!in", "&notin;"),
    ("¬in", "&notin;"),
    ("sum", "&sum;"),
    ("Sum", "&sum;"),
    ("prod", "&prod;"),
    ("Prod", "&prod;"),
    ("prop", "&prop;"),
    ("and", LOGICAL_AND),
    ("or", "&or;"),
    ("v", "&or;"),
    ("V", "&or;"),
    ("\\v", "&or;"),
    ("cup", "&cup;"),
    ("cap", "&cap;"),
    ("ang", "&ang;"),
    ("therefore", "&there4;"),
    ("'", PRIME),
    ("\\'", PRIME),
    ("%", PERCENT),
    ("...", ELLIPSIS),
    ("\\...", ELLIPSIS),
    ("\\A:", "&forall;"),
    ("\\E:", "&exist;"),
    ("\\:", ":"),
    ("\\;", ";"),
    ("-", MINUS),
    ("+", PLUS),
    ("+/-", "&plusmn;"),
    ("*", ASTERISK),
    ("@", "&part;"),
    ("$", "&int;"),
    ("$$", "&Int;"),
    ("$$$", "&iiint;"),
    ("=", "="),
    ("==", "="),
    ("!=", "&ne;"),
    ("¬=", "&ne;"),
    ("!==", "&ne;"),
    ("¬==", "&ne;"),
    ("===", "&equiv;"),
    ("~", "&sim;"),
    ("~~", "&asymp;"),
    ("~=", "&sime;"),
    ("~==", "&cong;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("<=", "&le;"),
    (">=", "&ge;"),
    ("<<", "&ll;"),
    (">>", "&gg;"),
    ("<<<", "&Ll;"),
    (">>>", "&Gg;"),
    (":<:", "&sub;"),
    (":>:", "&sup;"),
    (":<=:", "&sube;"),
    (":>=:", "&supe;"),
    (":!<:", "&nsub;"),
    (":¬<:", "&nsub;"),
    ("_|_", "&perp;"),
    ("->", "&rarr;"),
    ("-->", "&rarr;"),
    ("<--", "&larr;"),
    ("<->", "&harr;"),
    ("==>", "&rArr;"),
    ("<==", "&lArr;"),
    ("<=>", "&hArr;"),
    ("o", "&compfn;"),
    ("||", "&par;"),
    ("|", "&mid;"),
];

/// One dictionary, split into its whole-word and prefix-matched halves.
#[derive(Debug)]
pub struct SymbolTable {
    alphabetic: HashMap<&'static str, &'static str>,
    symbolic: HashMap<&'static str, &'static str>,
    /// Longest symbolic key, in chars.
    max_key_len: usize,
}

impl SymbolTable {
    pub fn from_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        let mut alphabetic = HashMap::new();
        let mut symbolic = HashMap::new();
        for &(key, value) in entries {
            if key.chars().all(is_alpha) {
                alphabetic.insert(key, value);
            } else {
                symbolic.insert(key, value);
            }
        }
        let max_key_len = symbolic
            .keys()
            .map(|key| key.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            alphabetic,
            symbolic,
            max_key_len,
        }
    }

    /// Look up a complete run of letters.
    pub fn lookup_word(&self, word: &str) -> Option<&'static str> {
        self.alphabetic.get(word).copied()
    }

    /// Longest symbolic key that prefixes `input`. Returns the value and how many
    /// chars the key spans.
    pub fn longest_prefix(&self, input: &[char]) -> Option<(&'static str, usize)> {
        let longest = self.max_key_len.min(input.len());
        (1..=longest).rev().find_map(|len| {
            let candidate: String = input[..len].iter().collect();
            self.symbolic
                .get(candidate.as_str())
                .map(|value| (*value, len))
        })
    }

    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }
}

pub static IDENTIFIERS: Lazy<SymbolTable> =
    Lazy::new(|| SymbolTable::from_entries(IDENTIFIER_ENTRIES));

pub static OPERATORS: Lazy<SymbolTable> =
    Lazy::new(|| SymbolTable::from_entries(OPERATOR_ENTRIES));

/// Letters for dictionary purposes are ASCII only.
pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}
