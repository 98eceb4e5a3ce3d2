//! Syntax checker for the conversion sentence

use crate::ast::{Leaf, ParseTree, Span, START_RULE};
use crate::error::SyntaxError;
use crate::lexer::{is_amount_literal, Lexer, Token, TokenKind};
use crate::vocabulary::Vocabulary;

use super::{ParseResult, ParseState};

/// Validates token order against
/// `start := KEYWORD NUMBER CURRENCY PREPOSITION CURRENCY END_MARKER`.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxChecker<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> SyntaxChecker<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Tokenize and check a sentence
    pub fn parse(&self, input: &str) -> ParseResult<ParseTree> {
        let tokens = Lexer::new(self.vocabulary).tokenize(input);
        self.parse_tokens(&tokens)
    }

    /// Check an already tokenized sentence
    pub fn parse_tokens(&self, tokens: &[Token]) -> ParseResult<ParseTree> {
        Recognizer::new(tokens, self.vocabulary).parse_start()
    }
}

/// Cursor over one token sequence. Lives for a single parse.
struct Recognizer<'a> {
    tokens: &'a [Token],
    vocabulary: &'a Vocabulary,
    current: usize,
    state: ParseState,
}

impl<'a> Recognizer<'a> {
    fn new(tokens: &'a [Token], vocabulary: &'a Vocabulary) -> Self {
        Self {
            tokens,
            vocabulary,
            current: 0,
            state: ParseState::INITIAL,
        }
    }

    fn parse_start(&mut self) -> ParseResult<ParseTree> {
        let vocab = self.vocabulary;

        self.expect_literal(TokenKind::Keyword, vocab.keyword())?;
        let (amount, amount_value) = self.expect_amount()?;
        let source = self.expect_currency()?;
        self.expect_literal(TokenKind::Preposition, vocab.preposition())?;
        let target = self.expect_currency()?;
        self.expect_literal(TokenKind::EndMarker, vocab.end_marker())?;
        self.expect_eof()?;

        let span = match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::dummy(),
        };

        Ok(ParseTree {
            rule: START_RULE.to_string(),
            amount,
            amount_value,
            source,
            target,
            span,
        })
    }

    // ==================== helpers ====================

    fn current_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    /// Move past the current token and into the next state
    fn advance(&mut self) {
        self.current += 1;
        self.state = self.state.next();
    }

    /// Zero-width span just past the last token
    fn end_span(&self) -> Span {
        let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
        Span::new(end, end)
    }

    fn expected(&self) -> String {
        let vocab = self.vocabulary;
        match self.state {
            ParseState::ExpectKeyword => format!("keyword `{}`", vocab.keyword()),
            ParseState::ExpectNumber => "an amount (digits with an optional decimal part)".to_string(),
            ParseState::ExpectSourceCurrency => "a source currency name".to_string(),
            ParseState::ExpectPreposition => format!("preposition `{}`", vocab.preposition()),
            ParseState::ExpectTargetCurrency => "a target currency name".to_string(),
            ParseState::ExpectEnd => format!("end marker `{}`", vocab.end_marker()),
            ParseState::Accept => "end of input".to_string(),
        }
    }

    /// Reject the current token, or the end of input if there is none
    fn error(&self) -> SyntaxError {
        match self.current_token() {
            Some(token) => SyntaxError::UnexpectedToken {
                state: self.state,
                expected: self.expected(),
                found: token.value.clone(),
                position: token.position,
                span: token.span,
            },
            None => SyntaxError::UnexpectedEnd {
                state: self.state,
                expected: self.expected(),
                span: self.end_span(),
            },
        }
    }

    /// Match a token of `kind` whose text is exactly `literal`
    fn expect_literal(&mut self, kind: TokenKind, literal: &str) -> ParseResult<()> {
        match self.current_token() {
            Some(token) if token.kind == kind && token.value == literal => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error()),
        }
    }

    fn expect_amount(&mut self) -> ParseResult<(Leaf, f64)> {
        match self.current_token() {
            Some(token) if token.kind == TokenKind::Number && is_amount_literal(&token.value) => {
                let value = token.value.parse::<f64>().map_err(|_| self.error())?;
                let leaf = Leaf::new(token.value.clone(), token.position, token.span);
                self.advance();
                Ok((leaf, value))
            }
            _ => Err(self.error()),
        }
    }

    fn expect_currency(&mut self) -> ParseResult<Leaf> {
        match self.current_token() {
            Some(token)
                if token.kind == TokenKind::Currency && self.vocabulary.contains(&token.value) =>
            {
                let leaf = Leaf::new(token.value.clone(), token.position, token.span);
                self.advance();
                Ok(leaf)
            }
            _ => Err(self.error()),
        }
    }

    fn expect_eof(&self) -> ParseResult<()> {
        match self.current_token() {
            None => Ok(()),
            Some(token) => Err(SyntaxError::TrailingInput {
                state: self.state,
                found: token.value.clone(),
                position: token.position,
                span: token.span,
            }),
        }
    }
}
