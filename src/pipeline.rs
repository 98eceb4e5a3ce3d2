//! Analysis pipeline for one sentence.
//!
//! Runs lexer → syntax checker → field extraction → (optionally) rate
//! conversion, collecting errors as it goes and rendering them with
//! `codespan-reporting` against the sentence text.

use crate::ast::{extract_fields, ConversionRequest, ParseTree};
use crate::error::{DiagnosticError, FxError, FxResult};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::parser::SyntaxChecker;
use crate::rates::{convert, Conversion, RateTable};
use crate::vocabulary::Vocabulary;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};
use serde::Serialize;

/// Name under which the sentence is registered for diagnostics
const SENTENCE_NAME: &str = "<input>";

/// Source text and accumulated errors for one sentence
pub struct AnalysisState {
    pub sentence: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    errors: Vec<DiagnosticError>,
}

impl AnalysisState {
    pub fn new(sentence: impl Into<String>) -> Self {
        let sentence = sentence.into();
        let mut files = SimpleFiles::new();
        let file_id = files.add(SENTENCE_NAME.to_string(), sentence.clone());

        Self {
            sentence,
            files,
            file_id,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: FxError) {
        self.errors.push(DiagnosticError::new(error, self.file_id));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }

    /// Emit every collected error to `writer`
    pub fn emit_diagnostics(&self, writer: &mut dyn WriteColor) -> FxResult<()> {
        let config = codespan_reporting::term::Config::default();
        for error in &self.errors {
            let diagnostic = error.to_diagnostic();
            codespan_reporting::term::emit(writer, &config, &self.files, &diagnostic)
                .map_err(|e| FxError::Io(format!("failed to emit diagnostic: {}", e)))?;
        }
        Ok(())
    }
}

/// Everything produced for one sentence
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub tree: Option<ParseTree>,
    pub request: Option<ConversionRequest>,
    pub conversion: Option<Conversion>,
}

impl Analysis {
    pub fn unknown_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.kind == TokenKind::Unknown)
    }

    pub fn accepted(&self) -> bool {
        self.tree.is_some()
    }
}

pub struct Pipeline<'v> {
    state: AnalysisState,
    vocabulary: &'v Vocabulary,
}

impl<'v> Pipeline<'v> {
    pub fn new(sentence: impl Into<String>, vocabulary: &'v Vocabulary) -> Self {
        Self {
            state: AnalysisState::new(sentence),
            vocabulary,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn tokenize(&self) -> Vec<Token> {
        let tokens = Lexer::new(self.vocabulary).tokenize(&self.state.sentence);
        log::debug!("tokenized {} word(s)", tokens.len());
        tokens
    }

    pub fn parse(&mut self, tokens: &[Token]) -> Option<ParseTree> {
        match SyntaxChecker::new(self.vocabulary).parse_tokens(tokens) {
            Ok(tree) => {
                log::debug!("sentence accepted");
                Some(tree)
            }
            Err(e) => {
                log::debug!("sentence rejected in state {}", e.state());
                self.state.add_error(e.into());
                None
            }
        }
    }

    pub fn convert(&mut self, request: &ConversionRequest, rates: &RateTable) -> Option<Conversion> {
        match convert(request, self.vocabulary, rates) {
            Ok(conversion) => Some(conversion),
            Err(e) => {
                log::warn!("conversion of {} {} failed: {}", request.amount, request.source, e);
                self.state.add_error(e.into());
                None
            }
        }
    }

    /// Run every stage. Conversion only happens when `rates` is given and
    /// the sentence was accepted.
    pub fn run(&mut self, rates: Option<&RateTable>) -> Analysis {
        let tokens = self.tokenize();
        let tree = self.parse(&tokens);
        let request = tree.as_ref().map(extract_fields);
        let conversion = match (&request, rates) {
            (Some(request), Some(rates)) => self.convert(request, rates),
            _ => None,
        };

        Analysis {
            tokens,
            tree,
            request,
            conversion,
        }
    }

    /// Print collected diagnostics to stderr
    pub fn report_errors(&self, color: ColorChoice) -> FxResult<()> {
        let writer = StandardStream::stderr(color);
        let mut lock = writer.lock();
        self.state.emit_diagnostics(&mut lock)
    }

    /// Collected diagnostics as plain text
    pub fn render_errors(&self) -> FxResult<String> {
        let mut buffer = NoColor::new(Vec::new());
        self.state.emit_diagnostics(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer.into_inner()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_without_rates_stops_after_extraction() {
        let vocab = Vocabulary::english();
        let mut pipeline = Pipeline::new("convert 100 DollarUSA to Euro $", &vocab);
        let analysis = pipeline.run(None);
        assert!(analysis.accepted());
        assert!(analysis.request.is_some());
        assert!(analysis.conversion.is_none());
        assert!(!pipeline.state().has_errors());
    }

    #[test]
    fn test_render_errors_points_at_word() {
        let vocab = Vocabulary::english();
        let mut pipeline = Pipeline::new("convert abc Euro to DollarUSA $", &vocab);
        let analysis = pipeline.run(None);
        assert!(!analysis.accepted());
        assert_eq!(analysis.unknown_tokens().count(), 1);

        let rendered = pipeline.render_errors().unwrap();
        assert!(rendered.contains("EXPECT_NUMBER"));
        assert!(rendered.contains("<input>"));
    }
}
