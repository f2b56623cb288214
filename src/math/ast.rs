//! The expression tree
//!
//! Parsing builds it, layout passes fold flat sibling runs into structured nodes,
//! and the serializer only reads it. Every variant is listed here so the set of
//! node kinds can be audited in one place; behaviour lives in the modules that
//! match on it.
//!
//! Leaf payloads (`symbol`, `text`, `value`, glyphs) are stored markup-ready:
//! dictionary hits are already entities and raw source text is already escaped.

use serde::Serialize;

/// One node of the expression tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Grid {
        rows: Vec<GridRow>,
    },
    /// Space-separated sequence of elements.
    Row {
        elements: Vec<Node>,
    },
    /// Tightly bound run of atoms, no blank in between.
    Cluster {
        elements: Vec<Node>,
    },
    Bracketed {
        left: String,
        right: String,
        contents: Option<Box<Node>>,
    },
    Identifier {
        symbol: String,
    },
    Operator {
        symbol: String,
    },
    Text {
        text: String,
    },
    Number {
        value: String,
    },
    Fraction {
        numerator: Box<Node>,
        denominator: Box<Node>,
    },
    Scripted {
        base: Box<Node>,
        subscript: Option<Box<Node>>,
        superscript: Option<Box<Node>>,
    },
    Root {
        radicand: Box<Node>,
        index: Option<Box<Node>>,
    },
    Limits {
        base: LimitsBase,
        lower: Box<Node>,
        upper: Option<Box<Node>>,
    },
    Overbrace {
        base: Box<Node>,
        comment: Box<Node>,
    },
    Underbrace {
        base: Box<Node>,
        comment: Box<Node>,
    },
}

/// The thing a [`Node::Limits`] decorates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LimitsBase {
    /// A large operator glyph such as `&sum;`.
    Glyph(String),
    /// A nested construct, usually another `Limits`.
    Node(Box<Node>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub row: Node,
}

impl Node {
    pub fn identifier(symbol: impl Into<String>) -> Self {
        Node::Identifier {
            symbol: symbol.into(),
        }
    }

    pub fn operator(symbol: impl Into<String>) -> Self {
        Node::Operator {
            symbol: symbol.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Node::Number {
            value: value.into(),
        }
    }

    pub fn empty_grid() -> Self {
        Node::Grid { rows: Vec::new() }
    }

    /// Row rule: zero elements elide, one element stands for itself.
    pub fn row(mut elements: Vec<Node>) -> Option<Self> {
        match elements.len() {
            0 => None,
            1 => elements.pop(),
            _ => Some(Node::Row { elements }),
        }
    }

    /// Same collapse rule as [`Node::row`], for tightly bound runs.
    pub fn cluster(mut elements: Vec<Node>) -> Option<Self> {
        match elements.len() {
            0 => None,
            1 => elements.pop(),
            _ => Some(Node::Cluster { elements }),
        }
    }

    /// A bracket with no delimiters and no contents is not a node; one with only
    /// contents is just its contents.
    pub fn bracketed(
        left: impl Into<String>,
        right: impl Into<String>,
        contents: Option<Node>,
    ) -> Option<Self> {
        let (left, right) = (left.into(), right.into());
        if left.is_empty() && right.is_empty() {
            return contents;
        }
        Some(Node::Bracketed {
            left,
            right,
            contents: contents.map(Box::new),
        })
    }

    /// Grid rule: a single cell in a single row is just that cell's row.
    pub fn grid(mut rows: Vec<GridRow>) -> Self {
        if rows.len() == 1 && rows[0].cells.len() == 1 {
            if let Some(cell) = rows.pop().and_then(|mut row| row.cells.pop()) {
                return cell.row;
            }
        }
        Node::Grid { rows }
    }

    pub fn as_operator(&self) -> Option<&str> {
        match self {
            Node::Operator { symbol } => Some(symbol),
            _ => None,
        }
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.as_operator() == Some(symbol)
    }

    /// Anything but an operator can be scripted, bounded or braced.
    pub fn is_operand(&self) -> bool {
        !matches!(self, Node::Operator { .. })
    }

    pub fn is_empty_grid(&self) -> bool {
        matches!(self, Node::Grid { rows } if rows.is_empty())
    }

    /// Left delimiter when this node is a bracketed group.
    pub fn bracket_left(&self) -> Option<&str> {
        match self {
            Node::Bracketed { left, .. } => Some(left),
            _ => None,
        }
    }

    /// Strip one level of brackets around an operand. Brackets with nothing
    /// inside are kept as they are.
    pub fn unwrap_bracketed(self) -> Node {
        match self {
            Node::Bracketed {
                contents: Some(contents),
                ..
            } => *contents,
            other => other,
        }
    }

    /// Sibling list of a Row or Cluster.
    pub fn sequence_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Row { elements } | Node::Cluster { elements } => Some(elements),
            _ => None,
        }
    }

    /// Sibling list of a Cluster only.
    pub fn cluster_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Cluster { elements } => Some(elements),
            _ => None,
        }
    }

    /// A Row or Cluster left with one element after folding is replaced by it.
    pub fn collapse_singleton(&mut self) {
        if let Some(elements) = self.sequence_mut() {
            if elements.len() == 1 {
                if let Some(only) = elements.pop() {
                    *self = only;
                }
            }
        }
    }

    /// Direct children, in document order. Leaves have none.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Grid { rows } => rows
                .iter()
                .flat_map(|row| row.cells.iter().map(|cell| &cell.row))
                .collect(),
            Node::Row { elements } | Node::Cluster { elements } => elements.iter().collect(),
            Node::Bracketed { contents, .. } => contents.iter().map(|c| c.as_ref()).collect(),
            Node::Identifier { .. }
            | Node::Operator { .. }
            | Node::Text { .. }
            | Node::Number { .. } => Vec::new(),
            Node::Fraction {
                numerator,
                denominator,
            } => vec![numerator.as_ref(), denominator.as_ref()],
            Node::Scripted {
                base,
                subscript,
                superscript,
            } => std::iter::once(base.as_ref())
                .chain(subscript.as_deref())
                .chain(superscript.as_deref())
                .collect(),
            Node::Root { radicand, index } => std::iter::once(radicand.as_ref())
                .chain(index.as_deref())
                .collect(),
            Node::Limits { base, lower, upper } => {
                let mut children = Vec::new();
                if let LimitsBase::Node(node) = base {
                    children.push(node.as_ref());
                }
                children.push(lower.as_ref());
                children.extend(upper.as_deref());
                children
            }
            Node::Overbrace { base, comment } | Node::Underbrace { base, comment } => {
                vec![base.as_ref(), comment.as_ref()]
            }
        }
    }

    /// Mutable counterpart of [`Node::children`].
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        match self {
            Node::Grid { rows } => rows
                .iter_mut()
                .flat_map(|row| row.cells.iter_mut().map(|cell| &mut cell.row))
                .collect(),
            Node::Row { elements } | Node::Cluster { elements } => elements.iter_mut().collect(),
            Node::Bracketed { contents, .. } => {
                contents.iter_mut().map(|c| c.as_mut()).collect()
            }
            Node::Identifier { .. }
            | Node::Operator { .. }
            | Node::Text { .. }
            | Node::Number { .. } => Vec::new(),
            Node::Fraction {
                numerator,
                denominator,
            } => vec![numerator.as_mut(), denominator.as_mut()],
            Node::Scripted {
                base,
                subscript,
                superscript,
            } => std::iter::once(base.as_mut())
                .chain(subscript.as_deref_mut())
                .chain(superscript.as_deref_mut())
                .collect(),
            Node::Root { radicand, index } => std::iter::once(radicand.as_mut())
                .chain(index.as_deref_mut())
                .collect(),
            Node::Limits { base, lower, upper } => {
                let mut children = Vec::new();
                if let LimitsBase::Node(node) = base {
                    children.push(node.as_mut());
                }
                children.push(lower.as_mut());
                children.extend(upper.as_deref_mut());
                children
            }
            Node::Overbrace { base, comment } | Node::Underbrace { base, comment } => {
                vec![base.as_mut(), comment.as_mut()]
            }
        }
    }

    /// Short name of the variant, used by the tree formatters.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Grid { .. } => "Grid",
            Node::Row { .. } => "Row",
            Node::Cluster { .. } => "Cluster",
            Node::Bracketed { .. } => "Bracketed",
            Node::Identifier { .. } => "Identifier",
            Node::Operator { .. } => "Operator",
            Node::Text { .. } => "Text",
            Node::Number { .. } => "Number",
            Node::Fraction { .. } => "Fraction",
            Node::Scripted { .. } => "Scripted",
            Node::Root { .. } => "Root",
            Node::Limits { .. } => "Limits",
            Node::Overbrace { .. } => "Overbrace",
            Node::Underbrace { .. } => "Underbrace",
        }
    }
}

/// Pre-order walk: visit a node, then each of its (possibly just rewritten) children.
pub fn walk_mut<F>(node: &mut Node, visit: &mut F)
where
    F: FnMut(&mut Node),
{
    visit(node);
    for child in node.children_mut() {
        walk_mut(child, visit);
    }
}
