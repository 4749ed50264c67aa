//! Behavior-driven tests for live feed sessions.
//!
//! The timer behind each session is the only long-lived resource in the
//! engine; these tests check it is released on every close path.

use std::time::Duration;

use creditlens_core::{FeedTracker, LiveFeedSession, ScoreSimulator, Ticker};
use creditlens_tests::{fast_facade, SampleLog, FAST_PERIOD};

fn grace() -> Duration {
    FAST_PERIOD * 3
}

#[tokio::test]
async fn when_stream_is_closed_after_first_sample_exactly_one_sample_is_delivered() {
    // Given: An open stream for a known company
    let facade = fast_facade();
    let log = SampleLog::new();
    let session = facade
        .open_stream("AAPL", log.sink(), None)
        .expect("stream opens");

    // When: It is closed right after the immediate sample
    assert_eq!(log.len(), 1);
    session.close();

    // Then: Nothing else arrives across several tick periods
    tokio::time::sleep(grace()).await;
    assert_eq!(log.len(), 1);
    assert_eq!(facade.active_streams(), 0);
}

#[tokio::test]
async fn when_many_sessions_close_no_timer_remains_and_output_stops() {
    // Given: N concurrent sessions across every company
    let facade = fast_facade();
    let tickers = ["AAPL", "tsla", "Msft"];
    let logs: Vec<SampleLog> = (0..12).map(|_| SampleLog::new()).collect();
    let sessions: Vec<LiveFeedSession> = logs
        .iter()
        .enumerate()
        .map(|(i, log)| {
            facade
                .open_stream(tickers[i % tickers.len()], log.sink(), None)
                .expect("stream opens")
        })
        .collect();
    assert_eq!(facade.active_streams(), 12);

    tokio::time::sleep(FAST_PERIOD * 2 + FAST_PERIOD / 2).await;

    // When: Half are closed explicitly and the rest are dropped
    for session in &sessions[..6] {
        session.close();
    }
    let counts: Vec<usize> = logs.iter().map(SampleLog::len).collect();
    drop(sessions);

    // Then: No sample arrives afterwards and every timer is gone
    tokio::time::sleep(grace()).await;
    assert_eq!(facade.active_streams(), 0);
    for (log, before) in logs.iter().zip(counts) {
        assert_eq!(log.len(), before, "session kept emitting after close");
        assert!(before >= 2, "expected the immediate sample plus ticks");
    }
}

#[tokio::test]
async fn when_ticker_is_unknown_no_session_or_timer_is_created() {
    let facade = fast_facade();
    let log = SampleLog::new();

    let err = facade
        .open_stream("ZZZZ", log.sink(), None)
        .expect_err("unknown ticker");

    assert!(err.is_not_found());
    assert!(log.is_empty(), "no sample before the existence check");
    assert_eq!(facade.active_streams(), 0);
}

#[tokio::test]
async fn samples_carry_ticker_and_stay_near_static_baseline() {
    let facade = fast_facade();
    let log = SampleLog::new();
    let session = facade
        .open_stream("tsla", log.sink(), Some(FAST_PERIOD))
        .expect("stream opens");

    tokio::time::sleep(FAST_PERIOD * 5).await;
    session.close();

    let samples = log.snapshot();
    assert!(samples.len() >= 4);
    for sample in samples {
        assert_eq!(sample.ticker.as_str(), "TSLA");
        assert!((sample.score - 68.0).abs() <= 1.0 + 1e-9, "drifted: {}", sample.score);
        assert!(sample.change.abs() <= 1.0);
    }
}

#[tokio::test]
async fn close_is_idempotent_across_explicit_close_and_drop() {
    let tracker = FeedTracker::new();
    let log = SampleLog::new();
    let session = LiveFeedSession::open(
        Ticker::parse("MSFT").expect("ticker"),
        94.0,
        ScoreSimulator::new(2.0).expect("amplitude"),
        FAST_PERIOD,
        log.sink(),
        &tracker,
    );

    session.close();
    session.close();
    assert!(session.is_closed());
    drop(session);

    tokio::time::sleep(grace()).await;
    assert_eq!(tracker.active(), 0);
    assert_eq!(log.len(), 1);
}
