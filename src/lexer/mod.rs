//! Lexical analysis of conversion sentences.
//!
//! The input is cut into whitespace-delimited words and every word is
//! classified on its own, with no lookahead and no context. Classification
//! never fails: anything unrecognised becomes an `UNKNOWN` token and is left
//! for the syntax checker to reject.
//!
//! Order of the checks (first match wins):
//!
//! 1. `$` → `END_MARKER`
//! 2. the conversion keyword, ignoring case → `KEYWORD`
//! 3. a finite real number → `NUMBER`
//! 4. the preposition, ignoring case → `PREPOSITION`
//! 5. a currency spelling, matching case → `CURRENCY`
//! 6. anything else → `UNKNOWN`

mod literal_parser;
mod token;

pub use literal_parser::{is_amount_literal, is_number, parse_number};
pub use token::{Token, TokenKind};

use crate::ast::Span;
use crate::vocabulary::Vocabulary;
use logos::Logos;

/// Raw segmentation of the input: runs of whitespace separate words
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"\s+")]
enum Segment {
    #[regex(r"[^\s]+")]
    Word,
}

/// A raw word with its byte span, before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Split the input into words. Empty fragments never appear.
pub fn split_words(input: &str) -> Vec<Word<'_>> {
    let mut lexer = Segment::lexer(input);
    let mut words = Vec::new();

    // `[^\s]+` covers every non-whitespace character, so an error slice is
    // still a word
    while lexer.next().is_some() {
        let span = lexer.span();
        let text = lexer.slice();
        if !text.is_empty() {
            words.push(Word {
                text,
                span: span.into(),
            });
        }
    }

    words
}

/// Lexer bound to a vocabulary
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> Lexer<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &'v Vocabulary {
        self.vocabulary
    }

    /// Tokenize a whole sentence
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        split_words(input)
            .into_iter()
            .enumerate()
            .map(|(index, word)| self.classify(word.text, index + 1, word.span))
            .collect()
    }

    /// Classify a single word found at `position` (1-based)
    pub fn classify(&self, word: &str, position: usize, span: Span) -> Token {
        let vocab = self.vocabulary;
        let messages = vocab.messages();

        let (kind, description) = if word == vocab.end_marker() {
            (TokenKind::EndMarker, messages.end_marker.clone())
        } else if word.to_lowercase() == vocab.keyword().to_lowercase() {
            (TokenKind::Keyword, messages.keyword.clone())
        } else if is_number(word) {
            (TokenKind::Number, messages.number.clone())
        } else if word.to_lowercase() == vocab.preposition().to_lowercase() {
            (TokenKind::Preposition, messages.preposition.clone())
        } else if let Some(descriptor) = vocab.get(word) {
            (
                TokenKind::Currency,
                format!("{}: {}", messages.currency, descriptor.name),
            )
        } else {
            (TokenKind::Unknown, messages.unknown.clone())
        };

        Token {
            line: 1,
            position,
            kind,
            value: word.to_owned(),
            description,
            span,
        }
    }
}

/// Tokenize with a one-off lexer
pub fn tokenize(vocabulary: &Vocabulary, input: &str) -> Vec<Token> {
    Lexer::new(vocabulary).tokenize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let vocab = Vocabulary::english();
        tokenize(&vocab, input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_sentence() {
        assert_eq!(
            kinds("convert 100 DollarUSA to Euro $"),
            vec![
                TokenKind::Keyword,
                TokenKind::Number,
                TokenKind::Currency,
                TokenKind::Preposition,
                TokenKind::Currency,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_split_words_spans() {
        let words = split_words("  convert\t 12.5\n$ ");
        let texts: Vec<_> = words.iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["convert", "12.5", "$"]);
        assert_eq!(words[0].span, Span::new(2, 9));
        assert_eq!(words[1].span, Span::new(11, 15));
        assert_eq!(words[2].span, Span::new(16, 17));
    }

    #[test]
    fn test_split_words_unicode() {
        let words = split_words("LempiraHondureño\u{3000}₿");
        let texts: Vec<_> = words.iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["LempiraHondureño", "₿"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(kinds("").is_empty());
        assert!(kinds(" \t\n ").is_empty());
    }

    #[test]
    fn test_positions_and_line() {
        let vocab = Vocabulary::english();
        let tokens = tokenize(&vocab, "convert 1 Euro");
        let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.position)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_currency_description_uses_name() {
        let vocab = Vocabulary::english();
        let tokens = tokenize(&vocab, "HonduranLempira");
        assert_eq!(tokens[0].description, "Currency: Honduran Lempira");
    }

    #[test]
    fn test_keyword_and_preposition_ignore_case() {
        assert_eq!(kinds("CONVERT To tO"), vec![
            TokenKind::Keyword,
            TokenKind::Preposition,
            TokenKind::Preposition,
        ]);
    }
}
