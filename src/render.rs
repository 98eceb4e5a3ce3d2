//! Text renderings for the token list and conversion results

use crate::lexer::Token;
use crate::rates::Conversion;
use crate::vocabulary::{CurrencyClass, Vocabulary};

/// Render tokens as a grid table with localised headers
pub fn token_table(tokens: &[Token], vocabulary: &Vocabulary) -> String {
    let headers = &vocabulary.messages().headers;
    let rows: Vec<[String; 5]> = tokens
        .iter()
        .map(|t| {
            [
                t.line.to_string(),
                t.position.to_string(),
                t.kind.to_string(),
                t.value.clone(),
                t.description.clone(),
            ]
        })
        .collect();

    let mut widths = [0usize; 5];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |fill: char| {
        let mut line = String::from("+");
        for width in widths {
            line.extend(std::iter::repeat(fill).take(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let row_line = |cells: &[String]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            let pad = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.extend(std::iter::repeat(' ').take(pad + 1));
            line.push('|');
        }
        line.push('\n');
        line
    };

    let mut out = rule('-');
    out.push_str(&row_line(&headers[..]));
    out.push_str(&rule('='));
    for row in &rows {
        out.push_str(&row_line(&row[..]));
        out.push_str(&rule('-'));
    }
    out
}

/// Format an amount with a precision suited to its currency class
pub fn format_amount(value: f64, class: CurrencyClass) -> String {
    match class {
        CurrencyClass::Fiat => format!("{:.2}", value),
        CurrencyClass::Crypto => format!("{:.8}", value),
    }
}

/// Rates get eight decimals as soon as either side is a cryptocurrency
pub fn format_rate(value: f64, source: CurrencyClass, target: CurrencyClass) -> String {
    if source == CurrencyClass::Crypto || target == CurrencyClass::Crypto {
        format!("{:.8}", value)
    } else {
        format!("{:.4}", value)
    }
}

/// Short summary: the converted amount plus direct and inverse rates.
///
/// ```text
/// 100 DollarUSA = 86.00 €
/// 1 USD = 0.8600 €
/// 1 € = 1.1628 USD
/// ```
pub fn conversion_summary(conversion: &Conversion) -> String {
    let source = &conversion.source;
    let target = &conversion.target;
    format!(
        "{} {} = {} {}\n1 {} = {} {}\n1 {} = {} {}\n",
        conversion.amount,
        conversion.source_key,
        format_amount(conversion.result, target.class),
        target.symbol,
        source.symbol,
        format_rate(conversion.rate, source.class, target.class),
        target.symbol,
        target.symbol,
        format_rate(conversion.inverse_rate, source.class, target.class),
        source.symbol,
    )
}

/// Currency listing grouped by class
pub fn currency_list(vocabulary: &Vocabulary) -> String {
    let mut out = String::new();
    for (title, class) in [("Fiat", CurrencyClass::Fiat), ("Crypto", CurrencyClass::Crypto)] {
        out.push_str(&format!("{}:\n", title));
        for (spelling, descriptor) in vocabulary.by_class(class) {
            out.push_str(&format!(
                "  {:<20} {:<5} {:<4} {}\n",
                spelling, descriptor.code, descriptor.symbol, descriptor.name
            ));
        }
    }
    out
}
