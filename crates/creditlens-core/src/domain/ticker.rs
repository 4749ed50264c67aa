use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_TICKER_LEN: usize = 10;

/// Company ticker, always stored in uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker to uppercase ASCII letters.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len,
                max: MAX_TICKER_LEN,
            });
        }

        if let Some((index, ch)) = normalized
            .chars()
            .enumerate()
            .find(|(_, ch)| !ch.is_ascii_alphabetic())
        {
            return Err(ValidationError::TickerInvalidChar { ch, index });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Uppercase form used as the lookup key, without format validation.
pub(crate) fn normalize_key(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}
