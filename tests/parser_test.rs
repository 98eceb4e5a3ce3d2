//! Syntax checker tests
//!
//! Acceptance, rejection states and field extraction.

use fxlang::ast::{extract_fields, ConversionRequest, ParseTree};
use fxlang::error::SyntaxError;
use fxlang::lexer::Lexer;
use fxlang::parser::{parse_request, ParseState, SyntaxChecker};
use fxlang::vocabulary::Vocabulary;
use pretty_assertions::assert_eq as assert_eq_pretty;
use test_case::test_case;

fn parse_source(source: &str) -> Result<ParseTree, SyntaxError> {
    let vocab = Vocabulary::english();
    SyntaxChecker::new(&vocab).parse(source)
}

fn assert_parse_success(source: &str) -> ParseTree {
    parse_source(source).expect("Parsing should succeed")
}

fn rejected_state(source: &str) -> ParseState {
    parse_source(source).expect_err("Parsing should fail").state()
}

#[test]
fn test_scenario_a() {
    let tree = assert_parse_success("convert 100 DollarUSA to Euro $");
    assert_eq_pretty!(
        extract_fields(&tree),
        ConversionRequest::new(100.0, "DollarUSA", "Euro")
    );
}

#[test]
fn test_scenario_b() {
    assert_eq!(
        rejected_state("convert abc Euro to DollarUSA $"),
        ParseState::ExpectNumber
    );
}

#[test]
fn test_scenario_c() {
    let err = parse_source("convert 50 euro to Euro $").unwrap_err();
    assert_eq!(err.state(), ParseState::ExpectSourceCurrency);
    match err {
        SyntaxError::UnexpectedToken { found, position, .. } => {
            assert_eq!(found, "euro");
            assert_eq!(position, 3);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_scenario_d() {
    let err = parse_source("").unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::UnexpectedEnd {
            state: ParseState::ExpectKeyword,
            ..
        }
    ));
}

#[test]
fn test_every_currency_pair_is_accepted() {
    let vocab = Vocabulary::english();
    let checker = SyntaxChecker::new(&vocab);
    for (source, _) in vocab.iter() {
        for (target, _) in vocab.iter() {
            let sentence = vocab.compose_sentence("2.50", source, target);
            let tree = checker.parse(&sentence).unwrap();
            let request = extract_fields(&tree);
            assert_eq!(request.amount, 2.5);
            assert_eq!(request.source, source);
            assert_eq!(request.target, target);
        }
    }
}

#[test_case("convert 100 DollarUSA to Euro" ; "marker dropped")]
#[test_case("convert 100 DollarUSA to Euro extra" ; "marker replaced")]
#[test_case("convert 100 DollarUSA to Euro $$" ; "marker doubled")]
#[test_case("convert 100 DollarUSA to Euro Euro" ; "repeated currency")]
fn test_missing_end_marker(source: &str) {
    assert_eq!(rejected_state(source), ParseState::ExpectEnd);
}

#[test_case("Convert 1 Euro to Euro $" => ParseState::ExpectKeyword ; "keyword case differs from literal")]
#[test_case("to 1 Euro to Euro $" => ParseState::ExpectKeyword ; "starts with preposition")]
#[test_case("convert -5 Euro to Euro $" => ParseState::ExpectNumber ; "negative amount")]
#[test_case("convert 1e3 Euro to Euro $" => ParseState::ExpectNumber ; "exponent amount")]
#[test_case("convert .5 Euro to Euro $" => ParseState::ExpectNumber ; "no integer part")]
#[test_case("convert Euro 1 to Euro $" => ParseState::ExpectNumber ; "swapped order")]
#[test_case("convert 1 Peso to Euro $" => ParseState::ExpectSourceCurrency ; "unknown source")]
#[test_case("convert 1 Euro TO Euro $" => ParseState::ExpectPreposition ; "preposition case differs")]
#[test_case("convert 1 Euro into Euro $" => ParseState::ExpectPreposition ; "wrong preposition")]
#[test_case("convert 1 Euro to euro $" => ParseState::ExpectTargetCurrency ; "lowercase target")]
#[test_case("convert 1 Euro to $" => ParseState::ExpectTargetCurrency ; "missing target")]
#[test_case("convert 1 Euro to Euro $ again" => ParseState::Accept ; "trailing words")]
fn test_rejections(source: &str) -> ParseState {
    rejected_state(source)
}

#[test]
fn test_decimal_forms() {
    assert_eq!(assert_parse_success("convert 5. Euro to Bitcoin $").amount_value, 5.0);
    assert_eq!(assert_parse_success("convert 0.125 Euro to Bitcoin $").amount_value, 0.125);
    assert_eq!(assert_parse_success("convert 007 Euro to Bitcoin $").amount.value, "007");
}

#[test]
fn test_zero_amount_is_grammatical() {
    assert_eq!(assert_parse_success("convert 0 Euro to Bitcoin $").amount_value, 0.0);
    assert_eq!(assert_parse_success("convert 0.0 Euro to Bitcoin $").amount_value, 0.0);
}

#[test]
fn test_whitespace_is_insignificant() {
    let tree = assert_parse_success("\tconvert   100\nDollarUSA  to Euro   $  ");
    assert_eq!(tree.children().map(|c| c.value.as_str()), ["100", "DollarUSA", "Euro"]);
}

#[test]
fn test_tree_pretty() {
    let tree = assert_parse_success("convert 100 DollarUSA to Euro $");
    assert_eq!(tree.pretty(), "start\n  100\n  DollarUSA\n  Euro\n");
}

#[test]
fn test_error_message_names_state_and_word() {
    let err = parse_source("convert 100 DollarUSA from Euro $").unwrap_err();
    assert_eq!(
        err.to_string(),
        "EXPECT_PREPOSITION: expected preposition `to`, found `from` at position 4"
    );
}

#[test]
fn test_parse_tokens_matches_parse() {
    let vocab = Vocabulary::english();
    let source = "convert 3 Solana to Quetzal $";
    let tokens = Lexer::new(&vocab).tokenize(source);
    let checker = SyntaxChecker::new(&vocab);
    assert_eq_pretty!(checker.parse_tokens(&tokens).unwrap(), checker.parse(source).unwrap());
}

#[test]
fn test_parse_request_spanish() {
    let vocab = Vocabulary::spanish();
    let request = parse_request(&vocab, "convertir 100 DolarEstadounidense a LempiraHondureño $").unwrap();
    assert_eq!(request, ConversionRequest::new(100.0, "DolarEstadounidense", "LempiraHondureño"));

    let err = parse_request(&vocab, "convert 100 DollarUSA to Euro $").unwrap_err();
    assert_eq!(err.state(), ParseState::ExpectKeyword);
}

#[test]
fn test_concurrent_parsing_shares_vocabulary() {
    let vocab = Vocabulary::english();
    let checker = SyntaxChecker::new(&vocab);
    let amounts: Vec<String> = (1..=8).map(|n| n.to_string()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = amounts
            .iter()
            .map(|amount| {
                scope.spawn(move || {
                    let sentence = format!("convert {amount} Bitcoin to Euro $");
                    extract_fields(&checker.parse(&sentence).unwrap())
                })
            })
            .collect();

        for (handle, amount) in handles.into_iter().zip(&amounts) {
            let request = handle.join().unwrap();
            assert_eq!(request.amount, amount.parse::<f64>().unwrap());
        }
    });
}
