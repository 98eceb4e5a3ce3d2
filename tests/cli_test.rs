//! Command line tests
//!
//! Runs the built `fxlang` binary end to end.

use std::fs;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn fxlang(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fxlang"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run fxlang")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_tokens_table() {
    let output = fxlang(&["tokens", "convert", "100", "DollarUSA", "to", "Euro", "$"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("| Token Kind "));
    for kind in ["KEYWORD", "NUMBER", "CURRENCY", "PREPOSITION", "END_MARKER"] {
        assert!(out.contains(kind), "missing {kind} in\n{out}");
    }
    assert!(out.contains("Currency: US Dollar"));
}

#[test]
fn test_tokens_json() {
    let output = fxlang(&["--format", "json", "tokens", "convert", "abc"]);
    assert!(output.status.success());
    let tokens: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(tokens[0]["kind"], "KEYWORD");
    assert_eq!(tokens[1]["kind"], "UNKNOWN");
    assert_eq!(tokens[1]["position"], 2);
}

#[test]
fn test_tree() {
    let output = fxlang(&["tree", "convert", "100", "DollarUSA", "to", "Euro", "$"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "start\n  100\n  DollarUSA\n  Euro\n");
}

#[test]
fn test_tree_rejection_exits_with_error() {
    let output = fxlang(&["tree", "convert", "abc", "Euro", "to", "DollarUSA", "$"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("EXPECT_NUMBER"), "{err}");
    assert!(err.contains("Sentence rejected"));
}

#[test]
fn test_convert_with_fallback_rates() {
    let output = fxlang(&["convert", "convert", "100", "DollarUSA", "to", "Euro", "$"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("100 DollarUSA = 86.00 €\n1 USD = 0.8600 €\n"));
}

#[test]
fn test_convert_with_rate_file() {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), r#"{"fiat": {"EUR": 0.5}}"#).unwrap();
    let path = file.path().to_str().unwrap();

    let output = fxlang(&["--rates", path, "convert", "convert", "3", "DollarUSA", "to", "Euro", "$"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("3 DollarUSA = 1.50 €"));
}

#[test]
fn test_convert_zero_amount_fails() {
    let output = fxlang(&["convert", "convert", "0", "DollarUSA", "to", "Euro", "$"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("amount must be greater than zero"), "{err}");
    assert!(err.contains("Conversion failed"));
}

#[test]
fn test_convert_json() {
    let output = fxlang(&["--format", "json", "convert", "convert", "2", "Bitcoin", "to", "DollarUSA", "$"]);
    assert!(output.status.success());
    let analysis: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(analysis["request"]["source"], "Bitcoin");
    assert_eq!(analysis["conversion"]["result"], 90000.0);
}

#[test]
fn test_spanish_locale() {
    let output = fxlang(&[
        "--locale", "es", "tokens", "convertir", "100", "DolarEstadounidense", "a", "Euro", "$",
    ]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Tipo Token"));
    assert!(out.contains("Moneda: Dólar Estadounidense"));
}

#[test]
fn test_compose() {
    let output = fxlang(&["compose", "--amount", "5", "--from", "Euro", "--to", "Solana"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "convert 5 Euro to Solana $\n");

    let output = fxlang(&["compose", "--amount", "-5", "--from", "Euro", "--to", "Solana", "--run"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("EXPECT_NUMBER"));
}

#[test]
fn test_currencies() {
    let output = fxlang(&["currencies"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("DollarUSA"));
    assert!(out.contains("Dogecoin"));
    assert!(!out.contains("---"));
}
