//! States of the sentence recogniser

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the checker within the single production.
///
/// `EXPECT_KEYWORD → EXPECT_NUMBER → EXPECT_CURRENCY_1 → EXPECT_PREPOSITION
/// → EXPECT_CURRENCY_2 → EXPECT_END → ACCEPT`. A mismatch in any state
/// rejects the input with that state recorded in the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseState {
    ExpectKeyword,
    ExpectNumber,
    ExpectSourceCurrency,
    ExpectPreposition,
    ExpectTargetCurrency,
    ExpectEnd,
    Accept,
}

impl ParseState {
    pub const INITIAL: ParseState = ParseState::ExpectKeyword;

    /// Successor after a successful match. `Accept` is terminal.
    pub fn next(self) -> ParseState {
        match self {
            ParseState::ExpectKeyword => ParseState::ExpectNumber,
            ParseState::ExpectNumber => ParseState::ExpectSourceCurrency,
            ParseState::ExpectSourceCurrency => ParseState::ExpectPreposition,
            ParseState::ExpectPreposition => ParseState::ExpectTargetCurrency,
            ParseState::ExpectTargetCurrency => ParseState::ExpectEnd,
            ParseState::ExpectEnd | ParseState::Accept => ParseState::Accept,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ParseState::ExpectKeyword => "EXPECT_KEYWORD",
            ParseState::ExpectNumber => "EXPECT_NUMBER",
            ParseState::ExpectSourceCurrency => "EXPECT_CURRENCY_1",
            ParseState::ExpectPreposition => "EXPECT_PREPOSITION",
            ParseState::ExpectTargetCurrency => "EXPECT_CURRENCY_2",
            ParseState::ExpectEnd => "EXPECT_END",
            ParseState::Accept => "ACCEPT",
        }
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_reaches_accept_in_six_steps() {
        let mut state = ParseState::INITIAL;
        let mut steps = 0;
        while state != ParseState::Accept {
            state = state.next();
            steps += 1;
        }
        assert_eq!(steps, 6);
        assert_eq!(ParseState::Accept.next(), ParseState::Accept);
    }

    #[test]
    fn test_names() {
        assert_eq!(ParseState::ExpectSourceCurrency.to_string(), "EXPECT_CURRENCY_1");
        assert_eq!(ParseState::ExpectTargetCurrency.to_string(), "EXPECT_CURRENCY_2");
    }
}
