//! Numeric literal checks

/// A word is a number when it parses as a finite floating-point value.
///
/// Signs, exponents and a leading or trailing dot are accepted (`-5`, `1e3`,
/// `.5`, `5.`); `NaN`, `inf` and overflowing literals are not.
pub fn parse_number(word: &str) -> Option<f64> {
    word.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn is_number(word: &str) -> bool {
    parse_number(word).is_some()
}

/// Whether a word has the amount form the grammar accepts:
/// one or more ASCII digits, optionally followed by `.` and more digits.
pub fn is_amount_literal(word: &str) -> bool {
    let (int_part, frac_part) = match word.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (word, None),
    };

    !int_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.map_or(true, |frac| frac.bytes().all(|b| b.is_ascii_digit()))
}
