//! Behavior-driven tests for the query facade.
//!
//! These tests exercise the operations the HTTP layer calls, focusing on
//! observable payloads rather than internal structure.

use creditlens_core::{CoreError, Dataset, Direction, EventWindow, Impact, OverallHealth};
use creditlens_tests::{bundled_records, facade_over, fast_facade, record_with};

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn when_ticker_case_differs_the_same_company_is_returned() {
    // Given: The bundled dataset
    let facade = fast_facade();

    // When: The same company is requested in different cases
    let lower = facade.get_drivers("aapl").expect("lowercase lookup");
    let upper = facade.get_drivers("AAPL").expect("uppercase lookup");

    // Then: Both resolve to the same record
    assert_eq!(lower, upper);
}

#[test]
fn when_ticker_is_unknown_every_query_reports_not_found() {
    let facade = fast_facade();

    let err = facade.get_company("ZZZZ").expect_err("unknown ticker");
    assert!(matches!(err, CoreError::NotFound { ref ticker } if ticker == "ZZZZ"));
    assert!(err.to_string().contains("not found"));
    assert!(!err.retryable(), "missing tickers are terminal");
    assert!(facade.get_history("zzzz", Some("3")).is_err());
}

#[test]
fn company_list_preserves_dataset_order() {
    let companies = fast_facade().list_companies();

    let tickers: Vec<&str> = companies.iter().map(|c| c.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["AAPL", "TSLA", "MSFT"]);
    assert_eq!(companies[1].current_score, 68.0);
}

// =============================================================================
// History
// =============================================================================

#[test]
fn when_days_is_unset_history_returns_last_seven_points() {
    // Given: A company with eight historical points
    let facade = fast_facade();

    // When: History is requested without a window
    let report = facade.get_history("TSLA", None).expect("history");

    // Then: The seven most recent points are returned in date order
    let dates: Vec<String> = report.history.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(
        dates,
        vec![
            "2025-08-16",
            "2025-08-17",
            "2025-08-18",
            "2025-08-19",
            "2025-08-20",
            "2025-08-21",
            "2025-08-22"
        ]
    );
}

#[test]
fn when_days_is_not_numeric_history_matches_the_default_window() {
    let facade = fast_facade();

    let default = facade.get_history("MSFT", None).expect("default");
    let invalid = facade.get_history("MSFT", Some("abc")).expect("invalid days");

    assert_eq!(invalid.history, default.history);
    assert_eq!(invalid.analytics, default.analytics);
}

#[test]
fn history_of_short_series_has_finite_fallback_analytics() {
    // Given: Companies with an empty and a single-point series
    let facade = facade_over(vec![
        record_with("EMPTY", 50.0, &[]),
        record_with("ONE", 50.0, &[("2025-08-22", 61.0)]),
    ]);

    // When: History is requested
    let empty = facade.get_history("EMPTY", None).expect("empty history");
    let single = facade.get_history("ONE", None).expect("single history");

    // Then: Analytics fall back to defined values instead of NaN
    assert!(empty.history.is_empty());
    assert_eq!(empty.analytics.average_score, 0.0);
    assert_eq!(empty.analytics.volatility, 0.0);
    assert_eq!(empty.analytics.trend, Direction::Stable);

    assert_eq!(single.analytics.average_score, 61.0);
    assert_eq!(single.analytics.volatility, 0.0);
    assert_eq!(single.analytics.trend, Direction::Stable);
}

#[test]
fn history_starting_at_zero_reports_stable_trend() {
    let facade = facade_over(vec![record_with(
        "ZERO",
        10.0,
        &[("2025-08-21", 0.0), ("2025-08-22", 10.0)],
    )]);

    let report = facade.get_history("ZERO", None).expect("history");

    assert_eq!(report.analytics.trend, Direction::Stable);
    assert!(report.analytics.volatility.is_finite());
}

#[test]
fn computed_trend_is_independent_of_stored_trend() {
    // Given: AAPL stores a "stable" trend but its recent series rises
    let facade = fast_facade();
    let detail = facade.get_company("AAPL").expect("detail");

    // When: The full history is analysed
    let report = facade.get_history("AAPL", Some("8")).expect("history");

    // Then: The two signals are reported as-is, without reconciliation
    assert_eq!(
        serde_json::to_value(detail.credit_metrics.metrics.trend).expect("json"),
        "stable"
    );
    assert_eq!(report.analytics.trend, Direction::Up);
}

// =============================================================================
// Drivers
// =============================================================================

#[test]
fn driver_weights_are_independent_contributions_not_a_distribution() {
    // Given: A record whose first two driver weights sum well above 1
    let mut record = record_with("HEAVY", 60.0, &[]);
    record.risk_drivers.truncate(2);
    record.risk_drivers[0].weight = 0.9;
    record.risk_drivers[1].weight = 0.8;
    record.risk_drivers[1].impact = Impact::Negative;

    // When: The dataset is built and drivers are queried
    let dataset = Dataset::new(vec![record]).expect("weights above 1 are accepted");
    let facade = facade_over(dataset.into_records());
    let report = facade.get_drivers("HEAVY").expect("drivers");

    // Then: Weights come back unchanged and the summary counts each impact
    let weights: Vec<f64> = report.drivers.iter().map(|d| d.weight).collect();
    assert_eq!(weights, vec![0.9, 0.8]);
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.positive, 1);
    assert_eq!(report.summary.negative, 1);
}

#[test]
fn bundled_driver_weights_need_not_sum_to_one() {
    let facade = fast_facade();

    let report = facade.get_drivers("AAPL").expect("drivers");

    let total: f64 = report.drivers.iter().map(|d| d.weight).sum();
    assert!((total - 0.70).abs() < 1e-9, "AAPL weights sum to {total}");
    assert_eq!(report.summary.total, 4);
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn events_are_returned_newest_first_regardless_of_stored_order() {
    // Given: Every bundled company, including one stored out of order
    let facade = fast_facade();

    for record in bundled_records() {
        // When: Events are requested
        let report = facade
            .get_events(record.ticker().as_str(), &EventWindow::default())
            .expect("events");

        // Then: Dates never increase
        assert!(
            report.events.windows(2).all(|pair| pair[0].date >= pair[1].date),
            "events for {} are not newest first",
            record.ticker()
        );
        assert_eq!(report.events.len(), record.market_events.len());
        assert_eq!(report.summary.impacts.total, report.events.len());
    }
}

#[test]
fn event_window_outside_the_data_yields_empty_summary() {
    let facade = fast_facade();
    let window = EventWindow::from_params(None, Some("2020-01-01"));

    let report = facade.get_events("TSLA", &window).expect("events");

    assert!(report.events.is_empty());
    assert_eq!(report.summary.impacts.total, 0);
    assert_eq!(report.summary.last_update, None);
}

// =============================================================================
// Scores
// =============================================================================

#[test]
fn score_samples_stay_within_bounds_at_the_extremes() {
    // Given: Companies sitting exactly on both score bounds
    let facade = facade_over(vec![
        record_with("FLOOR", 0.0, &[]),
        record_with("CEIL", 100.0, &[]),
    ]);

    // When: Many samples are drawn
    for _ in 0..500 {
        let floor = facade.get_score("FLOOR").expect("floor");
        let ceil = facade.get_score("CEIL").expect("ceil");

        // Then: Scores are clamped while change still reports the raw jitter
        assert!((0.0..=100.0).contains(&floor.score));
        assert!((0.0..=100.0).contains(&ceil.score));
        assert!(floor.change.abs() <= 1.5);
        assert_eq!(floor.trend, Direction::from_change(floor.change));
    }
}

#[test]
fn repeated_scores_do_not_drift_from_baseline() {
    let facade = fast_facade();

    for _ in 0..200 {
        let snapshot = facade.get_score("MSFT").expect("score");
        assert!((snapshot.score - 94.0).abs() <= 1.5 + 1e-9);
    }
}

// =============================================================================
// System health and comparison
// =============================================================================

#[test]
fn system_health_classifies_bundled_sources() {
    // Given: 14 of 18 sources healthy across the bundled companies
    let report = fast_facade().get_system_health();

    // Then: Every category is present and the overall state is good
    assert_eq!(report.summary.len(), 6);
    let healthy: u32 = report.summary.values().map(|c| c.healthy).sum();
    assert_eq!(healthy, 14);
    assert_eq!(report.overall_health, OverallHealth::Good);
}

#[test]
fn system_health_without_sources_is_poor() {
    let mut record = record_with("BARE", 50.0, &[]);
    record.data_source_health.clear();

    let report = facade_over(vec![record]).get_system_health();

    assert!(report.summary.values().all(|c| c.total() == 0));
    assert_eq!(report.overall_health, OverallHealth::Poor);
}

#[test]
fn comparison_rejects_more_than_ten_companies() {
    let tickers = [
        "AA", "BB", "CC", "DD", "EE", "FF", "GG", "HH", "II", "JJ", "KK",
    ];
    let records = tickers
        .iter()
        .map(|ticker| record_with(ticker, 50.0, &[]))
        .collect();
    let facade = facade_over(records);

    let err = facade.compare(&tickers).expect_err("too many");

    assert!(matches!(err, CoreError::Validation(_)));
    assert!(facade.compare(&tickers[..10]).is_ok());
}
