//! # CreditLens Core
//!
//! Metrics derivation and live-update engine for the CreditLens credit
//! intelligence service.
//!
//! ## Overview
//!
//! This crate owns everything below the HTTP boundary:
//!
//! - **Immutable company dataset** loaded and validated once at startup
//! - **Case-insensitive repository** for exact ticker lookup
//! - **Score simulator** producing jittered "current" scores around a static baseline
//! - **Statistics** over score series and data-source health
//! - **Live feed sessions** pushing periodic samples until closed
//! - **Query facade** assembling every response payload
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Engine tuning knobs and environment overrides |
//! | [`dataset`] | Bundled or file-backed company dataset |
//! | [`domain`] | Domain models (CompanyRecord, Ticker, UtcDateTime) |
//! | [`error`] | Core error types |
//! | [`facade`] | Query operations consumed by the API layer |
//! | [`live_feed`] | Per-subscriber periodic score feed |
//! | [`reports`] | Response payload types |
//! | [`repository`] | Read-only company lookup |
//! | [`simulator`] | Jittered score sampling |
//! | [`statistics`] | Volatility, trend and health aggregation |
//!
//! ## Quick Start
//!
//! ```rust
//! use creditlens_core::{EventWindow, QueryFacade};
//!
//! let facade = QueryFacade::bundled().expect("bundled dataset is valid");
//! let history = facade.get_history("aapl", Some("3")).expect("AAPL is bundled");
//! assert_eq!(history.history.len(), 3);
//!
//! let events = facade.get_events("AAPL", &EventWindow::default()).expect("AAPL is bundled");
//! assert!(events.events.windows(2).all(|pair| pair[0].date >= pair[1].date));
//! ```
//!
//! ## Error Handling
//!
//! Lookups of unknown tickers fail with [`CoreError::NotFound`]; malformed
//! inputs and datasets surface as [`CoreError::Validation`]. Nothing in the
//! core is retryable.

pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod facade;
pub mod live_feed;
pub mod reports;
pub mod repository;
pub mod simulator;
pub mod statistics;

// Configuration
pub use config::EngineConfig;

// Dataset and lookup
pub use dataset::{Dataset, BUNDLED_DATASET};
pub use repository::{CompanyRepository, CompanySummary};

// Domain models
pub use domain::{
    Alert, CompanyInfo, CompanyRecord, CreditMetrics, CreditTrend, FinancialHealth, Impact,
    MarketEvent, RiskDriver, ScoreDate, ScorePoint, Severity, SourceCategory, SourceState,
    SourceStatus, Ticker, UtcDateTime,
};

// Error types
pub use error::{CoreError, ValidationError};

// Query facade
pub use facade::{parse_days, EventWindow, QueryFacade, MAX_COMPARE};

// Live feed
pub use live_feed::{FeedTracker, LiveFeedSession, LiveSample, SampleSink};

// Response payloads
pub use reports::{
    CompanyDetail, ComparedCompany, ComparisonReport, ComparisonStats, DriversReport,
    EventSummary, EventsReport, HistoryAnalytics, HistoryReport, ImpactSummary,
    LiveCreditMetrics, ScoreSnapshot, SystemHealthReport,
};

// Simulation and statistics
pub use simulator::{ScoreSample, ScoreSimulator};
pub use statistics::{Direction, HealthSummary, OverallHealth, StatusCounts};
