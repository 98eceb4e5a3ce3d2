//! Token definitions

use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one input word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Number,
    Preposition,
    Currency,
    EndMarker,
    Unknown,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::Preposition => "PREPOSITION",
            TokenKind::Currency => "CURRENCY",
            TokenKind::EndMarker => "END_MARKER",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified word of the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Always 1: sentences are single-line
    pub line: usize,
    /// 1-based word index
    pub position: usize,
    pub kind: TokenKind,
    pub value: String,
    pub description: String,
    pub span: Span,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) @ {}:{}", self.kind, self.value, self.line, self.position)
    }
}
