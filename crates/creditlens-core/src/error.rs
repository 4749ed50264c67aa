use std::path::PathBuf;

use thiserror::Error;

/// Validation errors raised while loading the dataset or parsing inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("duplicate ticker '{ticker}' in dataset")]
    DuplicateTicker { ticker: String },
    #[error("duplicate risk driver id '{id}' for {ticker}")]
    DuplicateDriverId { ticker: String, id: String },
    #[error("historical scores for {ticker} are not ordered by date at index {index}")]
    UnorderedHistory { ticker: String, index: usize },
    #[error("offline source '{source_name}' for {ticker} must not report a latency")]
    OfflineLatency { ticker: String, source_name: String },

    #[error("comparison requires at least one ticker")]
    EmptyComparison,
    #[error("comparison supports at most {max} tickers, got {len}")]
    ComparisonTooLarge { len: usize, max: usize },

    #[error("config '{field}' is invalid: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

/// Top-level error type for engine operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("company data not found for ticker: {ticker}")]
    NotFound { ticker: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub fn not_found(ticker: impl Into<String>) -> Self {
        Self::NotFound {
            ticker: ticker.into(),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "company.not_found",
            Self::Validation(_) => "core.validation",
            Self::Serialization(_) => "core.serialization",
            Self::Io { .. } => "core.io",
        }
    }

    /// Engine failures are terminal; nothing in the core is retried.
    pub const fn retryable(&self) -> bool {
        false
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
