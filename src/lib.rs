//! fxlang: a tiny language for currency conversion sentences.
//!
//! A sentence such as `convert 100 DollarUSA to Euro $` goes through the
//! [`Lexer`], which classifies each word, and the [`SyntaxChecker`], which
//! validates the word order and yields a [`ParseTree`]. The tree's three
//! fields form a [`ConversionRequest`] that the [`rates`] module turns into a
//! number.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod rates;
pub mod render;
pub mod vocabulary;

// Re-export commonly used types
pub use ast::{extract_fields, ConversionRequest, ParseTree, Span};
pub use error::{FxError, FxResult, RateError, SyntaxError, VocabularyError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseState, SyntaxChecker};
pub use pipeline::{Analysis, Pipeline};
pub use rates::{Conversion, RateTable};
pub use vocabulary::{CurrencyClass, CurrencyDescriptor, Locale, Vocabulary};
