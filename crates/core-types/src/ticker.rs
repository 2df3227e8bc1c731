use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A normalized stock symbol: trimmed, upper-cased and never empty.
///
/// Only ASCII letters, digits and `. ^ = -` are accepted (`BRK.B`, `^GSPC`,
/// `EURUSD=X`, `BRK-B`). The ticker is derived once from user input and then
/// used as the aggregation key for every per-symbol result, as a URL path
/// segment and as an archive file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Normalizes raw user input into a `Ticker`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return Err(CoreError::InvalidInput(
                "ticker".to_string(),
                "symbol must not be empty".to_string(),
            ));
        }
        if let Some(c) = symbol.chars().find(|c| !is_symbol_char(*c)) {
            return Err(CoreError::InvalidInput(
                "ticker".to_string(),
                format!("'{}' contains unsupported character {:?}", symbol, c),
            ));
        }
        Ok(Self(symbol.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}
