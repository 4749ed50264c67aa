//! Response payloads assembled by the [`QueryFacade`](crate::QueryFacade).
//!
//! Field names serialize in camelCase to match the public JSON shapes.

use serde::Serialize;

use crate::statistics::{Direction, HealthSummary, OverallHealth};
use crate::{
    Alert, CompanyInfo, CompanySummary, CreditMetrics, FinancialHealth, Impact, MarketEvent,
    RiskDriver, ScorePoint, SourceStatus, Ticker, UtcDateTime,
};

/// Credit metrics with the score replaced by a fresh sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCreditMetrics {
    #[serde(flatten)]
    pub metrics: CreditMetrics,
    pub last_updated: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    pub company_info: CompanyInfo,
    pub credit_metrics: LiveCreditMetrics,
    pub financial_health: FinancialHealth,
    pub risk_drivers: Vec<RiskDriver>,
    pub market_events: Vec<MarketEvent>,
    pub historical_scores: Vec<ScorePoint>,
    pub data_source_health: std::collections::BTreeMap<String, SourceStatus>,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSnapshot {
    pub ticker: Ticker,
    pub score: f64,
    pub change: f64,
    pub timestamp: UtcDateTime,
    pub trend: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImpactSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
}

impl ImpactSummary {
    pub fn tally<I: IntoIterator<Item = Impact>>(impacts: I) -> Self {
        impacts
            .into_iter()
            .fold(Self::default(), |mut summary, impact| {
                summary.total += 1;
                match impact {
                    Impact::Positive => summary.positive += 1,
                    Impact::Negative => summary.negative += 1,
                }
                summary
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriversReport {
    pub drivers: Vec<RiskDriver>,
    pub summary: ImpactSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(flatten)]
    pub impacts: ImpactSummary,
    /// Date of the most recent event, `null` when there are none.
    pub last_update: Option<UtcDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventsReport {
    pub events: Vec<MarketEvent>,
    pub summary: EventSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnalytics {
    pub average_score: f64,
    pub volatility: f64,
    pub trend: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub history: Vec<ScorePoint>,
    pub analytics: HistoryAnalytics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealthReport {
    pub summary: HealthSummary,
    pub overall_health: OverallHealth,
    pub last_updated: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparedCompany {
    #[serde(flatten)]
    pub summary: CompanySummary,
    pub rating: String,
    pub live_score: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
    pub highest: Ticker,
    pub lowest: Ticker,
    pub average_score: f64,
    pub score_spread: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub companies: Vec<ComparedCompany>,
    pub comparison: ComparisonStats,
}
