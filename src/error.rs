//! Unified error handling.
//!
//! Each stage owns a small `thiserror` enum; [`FxError`] ties them together
//! and [`DiagnosticError`] turns any of them into a `codespan-reporting`
//! diagnostic pointing into the analysed sentence.

use crate::ast::Span;
use crate::parser::ParseState;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("conversion failed: {0}")]
    Rates(#[from] RateError),

    #[error("I/O error: {0}")]
    Io(String),
}

/// A sentence that does not match
/// `KEYWORD NUMBER CURRENCY PREPOSITION CURRENCY END_MARKER`.
///
/// Only the first point of divergence is reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("{state}: expected {expected}, found `{found}` at position {position}")]
    UnexpectedToken {
        state: ParseState,
        expected: String,
        found: String,
        position: usize,
        span: Span,
    },

    #[error("{state}: expected {expected}, found end of input")]
    UnexpectedEnd {
        state: ParseState,
        expected: String,
        span: Span,
    },

    #[error("{state}: unexpected `{found}` at position {position} after the end marker")]
    TrailingInput {
        state: ParseState,
        found: String,
        position: usize,
        span: Span,
    },
}

impl SyntaxError {
    /// The state the checker was in when it rejected the input
    pub fn state(&self) -> ParseState {
        match self {
            SyntaxError::UnexpectedToken { state, .. }
            | SyntaxError::UnexpectedEnd { state, .. }
            | SyntaxError::TrailingInput { state, .. } => *state,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxError::UnexpectedToken { span, .. }
            | SyntaxError::UnexpectedEnd { span, .. }
            | SyntaxError::TrailingInput { span, .. } => *span,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VocabularyError {
    #[error("currency spelling `{spelling}` is defined twice")]
    DuplicateCurrency { spelling: String },

    #[error("`{spelling}` is not a valid spelling (empty or contains whitespace)")]
    InvalidSpelling { spelling: String },

    #[error("`{literal}` collides with another grammar literal")]
    LiteralCollision { literal: String },

    #[error("`{spelling}` reads as a number and could never be matched")]
    NumericSpelling { spelling: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("amount must be greater than zero, got {amount}")]
    InvalidAmount { amount: f64 },

    #[error("`{key}` is not part of the vocabulary")]
    UnknownCurrency { key: String },

    #[error("no exchange rate available for {code}")]
    MissingRate { code: String },

    #[error("exchange rate for {code} must be positive, got {value}")]
    InvalidRate { code: String, value: f64 },

    #[error("malformed rate table: {message}")]
    Malformed { message: String },
}

/// An error bound to the file id of the sentence it refers to
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: FxError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: FxError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let (message, labels) = match &self.error {
            FxError::Syntax(e) => {
                let label = match e {
                    SyntaxError::UnexpectedToken { expected, .. } => {
                        format!("expected {} here", expected)
                    }
                    SyntaxError::UnexpectedEnd { expected, .. } => {
                        format!("sentence ends before {}", expected)
                    }
                    SyntaxError::TrailingInput { .. } => {
                        "nothing may follow the end marker".to_string()
                    }
                };
                let span = e.span();
                (
                    format!("syntax error in state {}", e.state()),
                    vec![Label::primary(self.file_id, span.start..span.end).with_message(label)],
                )
            }
            other => (other.to_string(), vec![]),
        };

        Diagnostic::error().with_message(message).with_labels(labels)
    }
}

pub type FxResult<T> = Result<T, FxError>;

impl From<std::io::Error> for FxError {
    fn from(e: std::io::Error) -> Self {
        FxError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for RateError {
    fn from(e: serde_json::Error) -> Self {
        RateError::Malformed {
            message: e.to_string(),
        }
    }
}
