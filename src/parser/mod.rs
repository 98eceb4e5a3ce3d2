//! Syntax checking.
//!
//! The language has exactly one sentence form:
//!
//! ```text
//! start := KEYWORD NUMBER CURRENCY PREPOSITION CURRENCY END_MARKER
//! ```
//!
//! Keyword, preposition and end marker must match the vocabulary literals
//! exactly; the amount must be one or more digits with an optional decimal
//! part; both currencies must be vocabulary spellings (case-sensitive). The
//! sentence is recognised by a hand-written state machine, one state per
//! grammar position, and a mismatch is reported at the first divergence.

mod parser_impl;
mod state;

pub use parser_impl::SyntaxChecker;
pub use state::ParseState;

use crate::ast::{ConversionRequest, ParseTree};
use crate::error::SyntaxError;
use crate::vocabulary::Vocabulary;

pub type ParseError = SyntaxError;
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a sentence and extract the conversion fields in one step
pub fn parse_request(vocabulary: &Vocabulary, input: &str) -> ParseResult<ConversionRequest> {
    let tree: ParseTree = SyntaxChecker::new(vocabulary).parse(input)?;
    Ok(crate::ast::extract_fields(&tree))
}
