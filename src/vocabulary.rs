//! The fixed vocabulary of the conversion language.
//!
//! A [`Vocabulary`] bundles everything the lexer and the syntax checker need
//! to know about one deployment: the conversion keyword, the preposition, the
//! end marker and the table of recognised currency spellings. It is built once
//! at startup and only ever borrowed afterwards.

use crate::error::VocabularyError;
use crate::lexer::is_number;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The literal that terminates every sentence, in every locale.
pub const END_MARKER: &str = "$";

/// Whether a currency is a government-issued currency or a cryptocurrency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyClass {
    Fiat,
    Crypto,
}

impl fmt::Display for CurrencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyClass::Fiat => write!(f, "fiat"),
            CurrencyClass::Crypto => write!(f, "crypto"),
        }
    }
}

/// Static description of one supported currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    /// ISO-like code (`USD`, `BTC`, ...)
    pub code: String,
    /// Display symbol
    pub symbol: String,
    /// Human-readable name
    pub name: String,
    pub class: CurrencyClass,
}

impl CurrencyDescriptor {
    pub fn new(code: &str, symbol: &str, name: &str, class: CurrencyClass) -> Self {
        Self {
            code: code.to_owned(),
            symbol: symbol.to_owned(),
            name: name.to_owned(),
            class,
        }
    }

    pub fn is_crypto(&self) -> bool {
        self.class == CurrencyClass::Crypto
    }
}

/// Deployment locale. Selects the grammar literals, the currency spellings and
/// the wording used in token descriptions and table headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Es => write!(f, "es"),
        }
    }
}

/// Localised wording for token descriptions and rendered tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub keyword: String,
    pub number: String,
    pub preposition: String,
    /// Prefix for currency descriptions; the descriptor name follows it.
    pub currency: String,
    pub end_marker: String,
    pub unknown: String,
    /// Column headers: line, position, kind, value, description
    pub headers: [String; 5],
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self {
                keyword: "Conversion command".to_owned(),
                number: "Amount to convert".to_owned(),
                preposition: "Conversion indicator".to_owned(),
                currency: "Currency".to_owned(),
                end_marker: "End of input marker".to_owned(),
                unknown: "Unrecognized token".to_owned(),
                headers: [
                    "Line".to_owned(),
                    "Position".to_owned(),
                    "Token Kind".to_owned(),
                    "Value".to_owned(),
                    "Description".to_owned(),
                ],
            },
            Locale::Es => Self {
                keyword: "Comando de conversión".to_owned(),
                number: "Cantidad a convertir".to_owned(),
                preposition: "Indicador de conversión".to_owned(),
                currency: "Moneda".to_owned(),
                end_marker: "Marcador de fin de entrada".to_owned(),
                unknown: "Token no reconocido".to_owned(),
                headers: [
                    "Línea".to_owned(),
                    "Posición".to_owned(),
                    "Tipo Token".to_owned(),
                    "Valor".to_owned(),
                    "Descripción".to_owned(),
                ],
            },
        }
    }
}

/// Immutable vocabulary shared by the lexer and the syntax checker
#[derive(Debug, Clone)]
pub struct Vocabulary {
    locale: Locale,
    keyword: String,
    preposition: String,
    currencies: IndexMap<String, CurrencyDescriptor>,
    messages: Messages,
}

impl Vocabulary {
    /// Build a vocabulary from explicit parts.
    ///
    /// Spellings must be unique, non-empty and free of whitespace (the lexer
    /// splits on whitespace, so such a spelling could never be matched). The
    /// keyword and preposition must not collide with each other, with the end
    /// marker or with a currency spelling, compared the way the lexer folds
    /// case. Words that read as numbers are classified before prepositions
    /// and currencies, so those spellings are rejected too.
    pub fn new<I>(
        locale: Locale,
        keyword: &str,
        preposition: &str,
        currencies: I,
    ) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (String, CurrencyDescriptor)>,
    {
        for literal in [keyword, preposition] {
            validate_spelling(literal)?;
            if literal == END_MARKER {
                return Err(VocabularyError::LiteralCollision {
                    literal: literal.to_owned(),
                });
            }
        }
        if same_literal(keyword, preposition) {
            return Err(VocabularyError::LiteralCollision {
                literal: preposition.to_owned(),
            });
        }
        if is_number(preposition) {
            return Err(VocabularyError::NumericSpelling {
                spelling: preposition.to_owned(),
            });
        }

        let mut table = IndexMap::new();
        for (spelling, descriptor) in currencies {
            validate_spelling(&spelling)?;
            if spelling == END_MARKER
                || same_literal(&spelling, keyword)
                || same_literal(&spelling, preposition)
            {
                return Err(VocabularyError::LiteralCollision { literal: spelling });
            }
            if is_number(&spelling) {
                return Err(VocabularyError::NumericSpelling { spelling });
            }
            if table.contains_key(&spelling) {
                return Err(VocabularyError::DuplicateCurrency { spelling });
            }
            table.insert(spelling, descriptor);
        }

        Ok(Self {
            locale,
            keyword: keyword.to_owned(),
            preposition: preposition.to_owned(),
            currencies: table,
            messages: Messages::for_locale(locale),
        })
    }

    /// The built-in vocabulary for a locale
    pub fn for_locale(locale: Locale) -> Self {
        let (keyword, preposition, currencies) = match locale {
            Locale::En => ("convert", "to", english_currencies()),
            Locale::Es => ("convertir", "a", spanish_currencies()),
        };

        Self {
            locale,
            keyword: keyword.to_owned(),
            preposition: preposition.to_owned(),
            currencies: currencies
                .into_iter()
                .map(|(spelling, descriptor)| (spelling.to_owned(), descriptor))
                .collect(),
            messages: Messages::for_locale(locale),
        }
    }

    pub fn english() -> Self {
        Self::for_locale(Locale::En)
    }

    pub fn spanish() -> Self {
        Self::for_locale(Locale::Es)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn preposition(&self) -> &str {
        &self.preposition
    }

    pub fn end_marker(&self) -> &str {
        END_MARKER
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Case-sensitive lookup of a currency spelling
    pub fn get(&self, spelling: &str) -> Option<&CurrencyDescriptor> {
        self.currencies.get(spelling)
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.currencies.contains_key(spelling)
    }

    /// All currencies in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurrencyDescriptor)> {
        self.currencies.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn by_class(&self, class: CurrencyClass) -> impl Iterator<Item = (&str, &CurrencyDescriptor)> {
        self.iter().filter(move |(_, d)| d.class == class)
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Build the canonical sentence for a conversion.
    ///
    /// Nothing is validated here; the sentence goes through the lexer and the
    /// syntax checker like any other input.
    pub fn compose_sentence(&self, amount: &str, source: &str, target: &str) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.keyword, amount, source, self.preposition, target, END_MARKER
        )
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}

fn validate_spelling(spelling: &str) -> Result<(), VocabularyError> {
    if spelling.is_empty() || spelling.chars().any(char::is_whitespace) {
        return Err(VocabularyError::InvalidSpelling {
            spelling: spelling.to_owned(),
        });
    }
    Ok(())
}

/// Keyword and preposition matching ignores case the same way the lexer does
fn same_literal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn crypto_currencies() -> Vec<(&'static str, CurrencyDescriptor)> {
    use CurrencyClass::Crypto;
    vec![
        ("Bitcoin", CurrencyDescriptor::new("BTC", "₿", "Bitcoin", Crypto)),
        ("Ethereum", CurrencyDescriptor::new("ETH", "Ξ", "Ethereum", Crypto)),
        ("Tether", CurrencyDescriptor::new("USDT", "₮", "Tether", Crypto)),
        ("BinanceCoin", CurrencyDescriptor::new("BNB", "BNB", "Binance Coin", Crypto)),
        ("Cardano", CurrencyDescriptor::new("ADA", "₳", "Cardano", Crypto)),
        ("Ripple", CurrencyDescriptor::new("XRP", "XRP", "Ripple", Crypto)),
        ("Solana", CurrencyDescriptor::new("SOL", "SOL", "Solana", Crypto)),
        ("Dogecoin", CurrencyDescriptor::new("DOGE", "Ð", "Dogecoin", Crypto)),
    ]
}

fn english_currencies() -> Vec<(&'static str, CurrencyDescriptor)> {
    use CurrencyClass::Fiat;
    let mut table = vec![
        ("DollarUSA", CurrencyDescriptor::new("USD", "USD", "US Dollar", Fiat)),
        ("HonduranLempira", CurrencyDescriptor::new("HNL", "L", "Honduran Lempira", Fiat)),
        ("Euro", CurrencyDescriptor::new("EUR", "€", "Euro", Fiat)),
        ("PoundSterling", CurrencyDescriptor::new("GBP", "£", "Pound Sterling", Fiat)),
        ("Quetzal", CurrencyDescriptor::new("GTQ", "Q", "Guatemalan Quetzal", Fiat)),
    ];
    table.extend(crypto_currencies());
    table
}

fn spanish_currencies() -> Vec<(&'static str, CurrencyDescriptor)> {
    use CurrencyClass::Fiat;
    let mut table = vec![
        ("DolarEstadounidense", CurrencyDescriptor::new("USD", "USD", "Dólar Estadounidense", Fiat)),
        ("LempiraHondureño", CurrencyDescriptor::new("HNL", "L", "Lempira Hondureño", Fiat)),
        ("Euro", CurrencyDescriptor::new("EUR", "€", "Euro", Fiat)),
        ("LibraEsterlina", CurrencyDescriptor::new("GBP", "£", "Libra Esterlina", Fiat)),
        ("Quetzal", CurrencyDescriptor::new("GTQ", "Q", "Quetzal Guatemalteco", Fiat)),
    ];
    table.extend(crypto_currencies());
    table
}
