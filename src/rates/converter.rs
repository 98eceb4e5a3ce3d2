//! Rate arithmetic: every conversion pivots through USD.

use super::{RateTable, PIVOT};
use crate::ast::ConversionRequest;
use crate::error::RateError;
use crate::vocabulary::{CurrencyDescriptor, Vocabulary};
use serde::Serialize;

/// Outcome of converting one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    /// Vocabulary spellings the request used
    pub source_key: String,
    pub target_key: String,
    pub result: f64,
    /// Units of target per 1 unit of source
    pub rate: f64,
    /// Units of source per 1 unit of target
    pub inverse_rate: f64,
    pub source: CurrencyDescriptor,
    pub target: CurrencyDescriptor,
    /// Raw table entries used for the source and target (USD rate or price)
    pub source_rate: f64,
    pub target_rate: f64,
}

/// Value of one unit of `currency` in USD, and the raw table entry used
fn usd_value(currency: &CurrencyDescriptor, rates: &RateTable) -> Result<(f64, f64), RateError> {
    if currency.is_crypto() {
        let price = rates.crypto_price(&currency.code)?;
        Ok((price, price))
    } else if currency.code == PIVOT {
        Ok((1.0, 1.0))
    } else {
        let rate = rates.fiat_rate(&currency.code)?;
        Ok((1.0 / rate, rate))
    }
}

fn descriptor<'v>(vocabulary: &'v Vocabulary, key: &str) -> Result<&'v CurrencyDescriptor, RateError> {
    vocabulary.get(key).ok_or_else(|| RateError::UnknownCurrency {
        key: key.to_string(),
    })
}

/// Convert a request using the given rates.
///
/// Both keys are resolved through the vocabulary, so a request extracted from
/// a parse tree built with the same vocabulary always resolves. The amount
/// must be positive; the grammar itself admits `0`.
pub fn convert(
    request: &ConversionRequest,
    vocabulary: &Vocabulary,
    rates: &RateTable,
) -> Result<Conversion, RateError> {
    if request.amount.is_nan() || request.amount <= 0.0 {
        return Err(RateError::InvalidAmount {
            amount: request.amount,
        });
    }

    let source = descriptor(vocabulary, &request.source)?;
    let target = descriptor(vocabulary, &request.target)?;

    let (source_usd, source_rate) = usd_value(source, rates)?;
    let (target_usd, target_rate) = usd_value(target, rates)?;

    let rate = source_usd / target_usd;
    let result = request.amount * rate;

    Ok(Conversion {
        amount: request.amount,
        source_key: request.source.clone(),
        target_key: request.target.clone(),
        result,
        rate,
        inverse_rate: 1.0 / rate,
        source: source.clone(),
        target: target.clone(),
        source_rate,
        target_rate,
    })
}
