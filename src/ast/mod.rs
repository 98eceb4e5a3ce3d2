//! Syntax tree for a conversion sentence.
//!
//! The language has a single production, so the tree is flat: one `start`
//! node with exactly three meaningful children (amount, source currency,
//! target currency). Keyword, preposition and end marker carry no meaning
//! once matched and are not kept.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte span into the analysed sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Name of the only production of the grammar
pub const START_RULE: &str = "start";

/// A matched literal kept in the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Raw text as it appeared in the sentence
    pub value: String,
    /// 1-based word position
    pub position: usize,
    pub span: Span,
}

impl Leaf {
    pub fn new(value: impl Into<String>, position: usize, span: Span) -> Self {
        Self {
            value: value.into(),
            position,
            span,
        }
    }
}

/// Tree produced by a successful parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseTree {
    pub rule: String,
    /// Amount literal, already known to be a valid number
    pub amount: Leaf,
    pub amount_value: f64,
    pub source: Leaf,
    pub target: Leaf,
    pub span: Span,
}

impl ParseTree {
    /// Children in fixed order: amount, source currency, target currency
    pub fn children(&self) -> [&Leaf; 3] {
        [&self.amount, &self.source, &self.target]
    }

    /// Indented text rendering: the rule name, then one child per line
    pub fn pretty(&self) -> String {
        let mut out = format!("{}\n", self.rule);
        for child in self.children() {
            out.push_str("  ");
            out.push_str(&child.value);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// The three fields handed to the rate converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    /// Vocabulary key of the source currency
    pub source: String,
    /// Vocabulary key of the target currency
    pub target: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            amount,
            source: source.into(),
            target: target.into(),
        }
    }
}

impl From<&ParseTree> for ConversionRequest {
    fn from(tree: &ParseTree) -> Self {
        extract_fields(tree)
    }
}

/// Pull the amount and both currency keys out of a parse tree.
///
/// A `ParseTree` only exists after a successful parse, so the fields are
/// always present.
pub fn extract_fields(tree: &ParseTree) -> ConversionRequest {
    let [_, source, target] = tree.children();
    ConversionRequest {
        amount: tree.amount_value,
        source: source.value.clone(),
        target: target.value.clone(),
    }
}
