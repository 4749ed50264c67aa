use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{ScoreDate, Ticker, UtcDateTime, ValidationError};

/// Direction recorded on the stored credit metrics baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditTrend {
    Stable,
    Rising,
    Declining,
}

/// Whether a driver or event helps or hurts the credit profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Reported state of a single upstream data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceState {
    Healthy,
    Degraded,
    Offline,
}

/// Known data source categories tracked by the system health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceCategory {
    SecFilings,
    MarketData,
    NewsAnalytics,
    SocialSentiment,
    MacroEconomic,
    CreditRatings,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 6] = [
        Self::SecFilings,
        Self::MarketData,
        Self::NewsAnalytics,
        Self::SocialSentiment,
        Self::MacroEconomic,
        Self::CreditRatings,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SecFilings => "secFilings",
            Self::MarketData => "marketData",
            Self::NewsAnalytics => "newsAnalytics",
            Self::SocialSentiment => "socialSentiment",
            Self::MacroEconomic => "macroEconomic",
            Self::CreditRatings => "creditRatings",
        }
    }

    /// Maps a `dataSourceHealth` key onto a known category; unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == key)
    }
}

impl Display for SourceCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub ticker: Ticker,
    pub sector: String,
    pub industry: String,
    pub market_cap: u64,
    pub employees: u32,
    pub founded: u16,
    pub headquarters: String,
}

/// Baseline credit metrics. Never mutated; live values are derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditMetrics {
    pub score: f64,
    pub change: f64,
    pub trend: CreditTrend,
    pub rating: String,
    pub risk_level: String,
    pub probability_of_default: f64,
    pub recovery_rate: f64,
    pub beta: f64,
    pub volatility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    pub revenue: f64,
    pub net_income: f64,
    pub total_debt: f64,
    pub cash_and_equivalents: f64,
    pub debt_to_equity: f64,
    pub current_ratio: f64,
    pub quick_ratio: f64,
    pub interest_coverage: f64,
    pub return_on_equity: f64,
    pub operating_margin: f64,
}

/// A factor contributing to a company's credit score. Weights are independent
/// contributions and are not expected to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDriver {
    pub id: String,
    pub name: String,
    pub category: String,
    pub impact: Impact,
    pub value: String,
    pub weight: f64,
    pub description: String,
    pub confidence: f64,
    pub last_updated: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEvent {
    pub id: String,
    pub title: String,
    pub date: UtcDateTime,
    pub category: String,
    pub impact: Impact,
    pub severity: Severity,
    pub score_change: f64,
    pub description: String,
    pub source: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: ScoreDate,
    pub score: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    pub status: SourceState,
    pub latency: Option<u32>,
    pub last_update: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub timestamp: UtcDateTime,
    pub acknowledged: bool,
}

/// Immutable per-company snapshot keyed by `company_info.ticker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub company_info: CompanyInfo,
    pub credit_metrics: CreditMetrics,
    pub financial_health: FinancialHealth,
    pub risk_drivers: Vec<RiskDriver>,
    pub market_events: Vec<MarketEvent>,
    pub historical_scores: Vec<ScorePoint>,
    pub data_source_health: BTreeMap<String, SourceStatus>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl CompanyRecord {
    pub fn ticker(&self) -> &Ticker {
        &self.company_info.ticker
    }

    pub fn baseline_score(&self) -> f64 {
        self.credit_metrics.score
    }

    /// Checks the record invariants once at load time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let ticker = self.ticker().as_str();
        let metrics = &self.credit_metrics;

        validate_range("creditMetrics.score", metrics.score, 0.0, 100.0)?;
        validate_finite("creditMetrics.change", metrics.change)?;
        validate_range(
            "creditMetrics.probabilityOfDefault",
            metrics.probability_of_default,
            0.0,
            1.0,
        )?;
        validate_range("creditMetrics.recoveryRate", metrics.recovery_rate, 0.0, 1.0)?;
        validate_finite("creditMetrics.beta", metrics.beta)?;
        validate_finite("creditMetrics.volatility", metrics.volatility)?;

        let mut driver_ids = HashSet::with_capacity(self.risk_drivers.len());
        for driver in &self.risk_drivers {
            if !driver_ids.insert(driver.id.as_str()) {
                return Err(ValidationError::DuplicateDriverId {
                    ticker: ticker.to_owned(),
                    id: driver.id.clone(),
                });
            }
            validate_finite("riskDrivers.weight", driver.weight)?;
            validate_range("riskDrivers.confidence", driver.confidence, 0.0, 1.0)?;
        }

        for event in &self.market_events {
            validate_finite("marketEvents.scoreChange", event.score_change)?;
        }

        for (index, pair) in self.historical_scores.windows(2).enumerate() {
            if pair[1].date < pair[0].date {
                return Err(ValidationError::UnorderedHistory {
                    ticker: ticker.to_owned(),
                    index: index + 1,
                });
            }
        }
        for point in &self.historical_scores {
            validate_range("historicalScores.score", point.score, 0.0, 100.0)?;
        }

        for (name, source) in &self.data_source_health {
            if source.status == SourceState::Offline && source.latency.is_some() {
                return Err(ValidationError::OfflineLatency {
                    ticker: ticker.to_owned(),
                    source_name: name.clone(),
                });
            }
        }

        Ok(())
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}
