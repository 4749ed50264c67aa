//! # Domain Models
//!
//! Immutable company records and the value types they are built from.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CompanyRecord`] | Full snapshot for one ticker |
//! | [`CreditMetrics`] | Baseline score, rating and risk figures |
//! | [`RiskDriver`] | Weighted factor behind the score |
//! | [`MarketEvent`] | Dated event with a signed score impact |
//! | [`ScorePoint`] | One point of the historical score series |
//! | [`SourceStatus`] | Health of one upstream data source |
//! | [`Ticker`] | Validated uppercase ticker |
//! | [`UtcDateTime`] / [`ScoreDate`] | Timestamps and calendar dates |
//!
//! Records are validated once when the dataset is loaded (see
//! [`CompanyRecord::validate`]) and never written to afterwards.

mod models;
mod ticker;
mod timestamp;

pub use models::{
    Alert, CompanyInfo, CompanyRecord, CreditMetrics, CreditTrend, FinancialHealth, Impact,
    MarketEvent, RiskDriver, ScorePoint, Severity, SourceCategory, SourceState, SourceStatus,
};
pub(crate) use ticker::normalize_key;
pub use ticker::Ticker;
pub use timestamp::{ScoreDate, UtcDateTime};
