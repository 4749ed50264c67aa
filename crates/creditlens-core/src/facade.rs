//! Query facade: the boundary the HTTP layer calls into.
//!
//! # Operations
//!
//! | Operation | Failure |
//! |-----------|---------|
//! | [`list_companies`](QueryFacade::list_companies) | never |
//! | [`get_company`](QueryFacade::get_company) | `NotFound` |
//! | [`get_score`](QueryFacade::get_score) | `NotFound` |
//! | [`get_drivers`](QueryFacade::get_drivers) | `NotFound` |
//! | [`get_events`](QueryFacade::get_events) | `NotFound` |
//! | [`get_history`](QueryFacade::get_history) | `NotFound` |
//! | [`get_system_health`](QueryFacade::get_system_health) | never |
//! | [`compare`](QueryFacade::compare) | `Validation`, `NotFound` |
//! | [`open_stream`](QueryFacade::open_stream) | `NotFound` before any sample |
//!
//! Every value is derived on read from the immutable repository.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::live_feed::{FeedTracker, LiveFeedSession, SampleSink};
use crate::reports::{
    CompanyDetail, ComparedCompany, ComparisonReport, ComparisonStats, DriversReport,
    EventSummary, EventsReport, HistoryAnalytics, HistoryReport, ImpactSummary,
    LiveCreditMetrics, ScoreSnapshot, SystemHealthReport,
};
use crate::statistics::{self, mean};
use crate::{
    CompanyRecord, CompanyRepository, CompanySummary, CoreError, Dataset, EngineConfig,
    ScoreSimulator, UtcDateTime, ValidationError,
};

/// Upper bound on tickers accepted by a single comparison.
pub const MAX_COMPARE: usize = 10;

/// Optional inclusive date bounds for event queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventWindow {
    pub start: Option<UtcDateTime>,
    pub end: Option<UtcDateTime>,
}

impl EventWindow {
    /// Unparsable bounds are dropped rather than rejected.
    pub fn from_params(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.and_then(|raw| UtcDateTime::parse_lenient(raw.trim(), false)),
            end: end.and_then(|raw| UtcDateTime::parse_lenient(raw.trim(), true)),
        }
    }

    pub fn contains(&self, at: UtcDateTime) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}

/// Resolve the `days` history parameter from its leading digits.
///
/// `"2.5"` reads as 2 and `"3abc"` as 3. Values too large for `usize` saturate
/// and select the whole series. Input without leading digits, or zero, uses `default`.
pub fn parse_days(raw: Option<&str>, default: usize) -> usize {
    let Some(value) = raw.map(str::trim) else {
        return default;
    };
    let days = value
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0usize, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(usize::from(digit - b'0'))
        });

    if days == 0 {
        default
    } else {
        days
    }
}

#[derive(Debug, Clone)]
pub struct QueryFacade {
    repository: Arc<CompanyRepository>,
    config: EngineConfig,
    score_simulator: ScoreSimulator,
    detail_simulator: ScoreSimulator,
    stream_simulator: ScoreSimulator,
    feeds: FeedTracker,
}

impl QueryFacade {
    pub fn new(repository: Arc<CompanyRepository>, config: EngineConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            repository,
            config,
            score_simulator: ScoreSimulator::new(config.score_amplitude)?,
            detail_simulator: ScoreSimulator::new(config.detail_amplitude)?,
            stream_simulator: ScoreSimulator::new(config.stream_amplitude)?,
            feeds: FeedTracker::new(),
        })
    }

    /// Facade over the bundled dataset with default configuration.
    pub fn bundled() -> Result<Self, CoreError> {
        let repository = CompanyRepository::new(Dataset::bundled()?);
        Self::new(Arc::new(repository), EngineConfig::default())
    }

    pub fn repository(&self) -> &CompanyRepository {
        &self.repository
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Live feed timers still scheduled.
    pub fn active_streams(&self) -> usize {
        self.feeds.active()
    }

    pub fn list_companies(&self) -> Vec<CompanySummary> {
        let companies = self.repository.list_summaries();
        info!(count = companies.len(), "companies list requested");
        companies
    }

    pub fn get_company(&self, ticker: &str) -> Result<CompanyDetail, CoreError> {
        let record = self.lookup(ticker)?;
        let sample = self.detail_simulator.sample(record.baseline_score());

        let mut metrics = record.credit_metrics.clone();
        metrics.score = sample.score;

        info!(ticker = %record.ticker(), "company data requested");
        Ok(CompanyDetail {
            company_info: record.company_info.clone(),
            credit_metrics: LiveCreditMetrics {
                metrics,
                last_updated: UtcDateTime::now(),
            },
            financial_health: record.financial_health.clone(),
            risk_drivers: record.risk_drivers.clone(),
            market_events: record.market_events.clone(),
            historical_scores: record.historical_scores.clone(),
            data_source_health: record.data_source_health.clone(),
            alerts: record.alerts.clone(),
        })
    }

    pub fn get_score(&self, ticker: &str) -> Result<ScoreSnapshot, CoreError> {
        let record = self.lookup(ticker)?;
        let sample = self.score_simulator.sample(record.baseline_score());

        Ok(ScoreSnapshot {
            ticker: record.ticker().clone(),
            score: sample.score,
            change: sample.change,
            timestamp: UtcDateTime::now(),
            trend: sample.direction(),
        })
    }

    pub fn get_drivers(&self, ticker: &str) -> Result<DriversReport, CoreError> {
        let record = self.lookup(ticker)?;
        Ok(DriversReport {
            summary: ImpactSummary::tally(record.risk_drivers.iter().map(|d| d.impact)),
            drivers: record.risk_drivers.clone(),
        })
    }

    /// Events in the window, most recent first. Sorted on every call.
    pub fn get_events(&self, ticker: &str, window: &EventWindow) -> Result<EventsReport, CoreError> {
        let record = self.lookup(ticker)?;

        let mut events: Vec<_> = record
            .market_events
            .iter()
            .filter(|event| window.contains(event.date))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));

        let summary = EventSummary {
            impacts: ImpactSummary::tally(events.iter().map(|e| e.impact)),
            last_update: events.first().map(|event| event.date),
        };
        Ok(EventsReport { events, summary })
    }

    /// Trailing `days` points of the series with analytics over that slice.
    pub fn get_history(&self, ticker: &str, days: Option<&str>) -> Result<HistoryReport, CoreError> {
        let record = self.lookup(ticker)?;
        let days = parse_days(days, self.config.default_history_days);

        let series = &record.historical_scores;
        let history = series[series.len().saturating_sub(days)..].to_vec();
        let scores: Vec<f64> = history.iter().map(|point| point.score).collect();

        Ok(HistoryReport {
            analytics: HistoryAnalytics {
                average_score: mean(&scores),
                volatility: statistics::volatility(&scores),
                trend: statistics::trend(&scores),
            },
            history,
        })
    }

    pub fn get_system_health(&self) -> SystemHealthReport {
        let summary = statistics::aggregate_source_health(self.repository.records());
        let overall_health = statistics::overall_health(summary.values());

        SystemHealthReport {
            summary,
            overall_health,
            last_updated: UtcDateTime::now(),
        }
    }

    /// Side-by-side view of up to [`MAX_COMPARE`] companies. Duplicates are collapsed.
    pub fn compare<S: AsRef<str>>(&self, tickers: &[S]) -> Result<ComparisonReport, CoreError> {
        let mut records: Vec<&CompanyRecord> = Vec::with_capacity(tickers.len());
        for raw in tickers {
            let raw: &str = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            let record = self.lookup(raw)?;
            if !records.iter().any(|seen| seen.ticker() == record.ticker()) {
                records.push(record);
            }
        }

        if records.is_empty() {
            return Err(ValidationError::EmptyComparison.into());
        }
        if records.len() > MAX_COMPARE {
            return Err(ValidationError::ComparisonTooLarge {
                len: records.len(),
                max: MAX_COMPARE,
            }
            .into());
        }

        let (mut highest, mut lowest) = (records[0], records[0]);
        for record in &records[1..] {
            if record.baseline_score() > highest.baseline_score() {
                highest = record;
            }
            if record.baseline_score() < lowest.baseline_score() {
                lowest = record;
            }
        }
        let baselines: Vec<f64> = records.iter().map(|r| r.baseline_score()).collect();

        let comparison = ComparisonStats {
            highest: highest.ticker().clone(),
            lowest: lowest.ticker().clone(),
            average_score: mean(&baselines),
            score_spread: highest.baseline_score() - lowest.baseline_score(),
        };

        let companies = records
            .into_iter()
            .map(|record| {
                let sample = self.score_simulator.sample(record.baseline_score());
                ComparedCompany {
                    summary: CompanySummary::from_record(record),
                    rating: record.credit_metrics.rating.clone(),
                    live_score: sample.score,
                    change: sample.change,
                }
            })
            .collect();

        Ok(ComparisonReport {
            companies,
            comparison,
        })
    }

    /// Open a live feed for `ticker`. Fails before any sample when the ticker is unknown.
    ///
    /// `period` defaults to the configured stream period. Must be called within a Tokio runtime.
    pub fn open_stream<S: SampleSink>(
        &self,
        ticker: &str,
        sink: S,
        period: Option<Duration>,
    ) -> Result<LiveFeedSession, CoreError> {
        let record = self.lookup(ticker)?;
        Ok(LiveFeedSession::open(
            record.ticker().clone(),
            record.baseline_score(),
            self.stream_simulator,
            period.unwrap_or(self.config.stream_period),
            sink,
            &self.feeds,
        ))
    }

    fn lookup(&self, ticker: &str) -> Result<&CompanyRecord, CoreError> {
        self.repository.lookup(ticker).inspect_err(|err| {
            warn!(ticker = %ticker.trim(), error = %err, "company lookup failed");
        })
    }
}
