//! Exchange rate tables.
//!
//! Fiat rates are expressed as units of the currency per 1 USD; crypto rates
//! as the USD price of one coin. USD is the pivot for every conversion.

mod converter;

pub use converter::{convert, Conversion};

use crate::error::RateError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Code of the pivot currency
pub const PIVOT: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Units of the currency per 1 USD
    #[serde(default)]
    pub fiat: IndexMap<String, f64>,
    /// USD price of one unit
    #[serde(default)]
    pub crypto: IndexMap<String, f64>,
}

impl RateTable {
    /// Built-in rates used when nothing better is available
    pub fn fallback() -> Self {
        let fiat = [
            ("USD", 1.0),
            ("HNL", 26.23),
            ("EUR", 0.86),
            ("GBP", 0.79),
            ("GTQ", 7.80),
        ];
        let crypto = [
            ("BTC", 45000.0),
            ("ETH", 2500.0),
            ("USDT", 1.0),
            ("BNB", 320.0),
            ("ADA", 0.45),
            ("XRP", 0.55),
            ("SOL", 100.0),
            ("DOGE", 0.08),
        ];

        Self {
            fiat: fiat.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
            crypto: crypto.iter().map(|(c, r)| (c.to_string(), *r)).collect(),
        }
    }

    /// Parse a JSON rate table and validate it
    pub fn from_json_str(json: &str) -> Result<Self, RateError> {
        let table: RateTable = serde_json::from_str(json)?;
        table.validated()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| RateError::Malformed {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        log::debug!("loaded rate table from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Rates must be finite and positive; USD is pinned to 1.0
    fn validated(mut self) -> Result<Self, RateError> {
        for (code, value) in self.fiat.iter().chain(self.crypto.iter()) {
            if !value.is_finite() || *value <= 0.0 {
                return Err(RateError::InvalidRate {
                    code: code.clone(),
                    value: *value,
                });
            }
        }

        match self.fiat.get(PIVOT).copied() {
            Some(rate) if rate != 1.0 => {
                log::warn!("ignoring USD rate {} in rate table, pinning it to 1.0", rate);
                self.fiat.insert(PIVOT.to_string(), 1.0);
            }
            Some(_) => {}
            None => {
                self.fiat.insert(PIVOT.to_string(), 1.0);
            }
        }

        Ok(self)
    }

    /// Units of a fiat currency per 1 USD
    pub fn fiat_rate(&self, code: &str) -> Result<f64, RateError> {
        lookup(&self.fiat, code)
    }

    /// USD price of one unit of a crypto currency
    pub fn crypto_price(&self, code: &str) -> Result<f64, RateError> {
        lookup(&self.crypto, code)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::fallback()
    }
}

fn lookup(table: &IndexMap<String, f64>, code: &str) -> Result<f64, RateError> {
    match table.get(code) {
        Some(value) if value.is_finite() && *value > 0.0 => Ok(*value),
        Some(value) => Err(RateError::InvalidRate {
            code: code.to_string(),
            value: *value,
        }),
        None => Err(RateError::MissingRate {
            code: code.to_string(),
        }),
    }
}
