//! Per-subscriber live score feed.
//!
//! A [`LiveFeedSession`] moves through `Open -> (tick)* -> Closed`. Opening
//! delivers one sample immediately and starts a repeating timer; every tick
//! samples the static baseline again, so values never drift. Closing cancels
//! the timer and drops the sink, after which no callback can fire. Close is
//! idempotent and also runs on drop.
//!
//! The session does not know about transports. Anything implementing
//! [`SampleSink`] (including `FnMut(LiveSample) -> bool` closures) can
//! receive samples; returning `false` signals that the subscriber is gone and
//! closes the session from the inside.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{ScoreSimulator, Ticker, UtcDateTime};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Payload pushed to subscribers on every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSample {
    pub ticker: Ticker,
    pub score: f64,
    pub change: f64,
    pub timestamp: UtcDateTime,
}

/// Receiver of live samples.
pub trait SampleSink: Send + 'static {
    /// Returns `false` once the subscriber can no longer accept samples.
    fn deliver(&mut self, sample: LiveSample) -> bool;
}

impl<F> SampleSink for F
where
    F: FnMut(LiveSample) -> bool + Send + 'static,
{
    fn deliver(&mut self, sample: LiveSample) -> bool {
        self(sample)
    }
}

/// Counts feed timers that are still scheduled.
#[derive(Debug, Clone, Default)]
pub struct FeedTracker {
    active: Arc<AtomicUsize>,
}

impl FeedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    fn enter(&self) -> TimerGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        TimerGuard {
            active: Arc::clone(&self.active),
        }
    }
}

struct TimerGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

struct FeedShared {
    sink: Mutex<Option<Box<dyn SampleSink>>>,
    closed: AtomicBool,
}

impl FeedShared {
    fn deliver(&self, sample: LiveSample) -> bool {
        let mut sink = self
            .sink
            .lock()
            .expect("live feed sink lock is not poisoned");
        let Some(active) = sink.as_mut() else {
            return false;
        };

        if active.deliver(sample) {
            return true;
        }

        *sink = None;
        self.closed.store(true, Ordering::SeqCst);
        false
    }

    /// Returns `true` only for the call that actually performed the close.
    fn close(&self) -> bool {
        let already_closed = self.closed.swap(true, Ordering::SeqCst);
        let sink = self
            .sink
            .lock()
            .expect("live feed sink lock is not poisoned")
            .take();
        !already_closed || sink.is_some()
    }
}

/// Handle for one subscriber's live feed. Dropping it closes the feed.
pub struct LiveFeedSession {
    id: Uuid,
    ticker: Ticker,
    shared: Arc<FeedShared>,
    timer: Option<JoinHandle<()>>,
}

impl LiveFeedSession {
    /// Deliver one sample now, then one per `period` until closed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open<S: SampleSink>(
        ticker: Ticker,
        baseline: f64,
        simulator: ScoreSimulator,
        period: Duration,
        sink: S,
        tracker: &FeedTracker,
    ) -> Self {
        let id = Uuid::new_v4();
        let period = period.max(MIN_PERIOD);
        let shared = Arc::new(FeedShared {
            sink: Mutex::new(Some(Box::new(sink))),
            closed: AtomicBool::new(false),
        });

        info!(session = %id, ticker = %ticker, period_ms = period.as_millis() as u64, "live feed opened");

        if !shared.deliver(LiveSample::draw(&ticker, baseline, &simulator)) {
            info!(session = %id, ticker = %ticker, "subscriber gone before first tick");
            return Self {
                id,
                ticker,
                shared,
                timer: None,
            };
        }

        let guard = tracker.enter();
        let task_shared = Arc::clone(&shared);
        let task_ticker = ticker.clone();
        let timer = tokio::spawn(async move {
            let _guard = guard;
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let sample = LiveSample::draw(&task_ticker, baseline, &simulator);
                debug!(session = %id, score = sample.score, change = sample.change, "live sample");
                if !task_shared.deliver(sample) {
                    info!(session = %id, ticker = %task_ticker, "subscriber disconnected");
                    break;
                }
            }
        });

        Self {
            id,
            ticker,
            shared,
            timer: Some(timer),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// Whether the timer task has not yet been torn down by the runtime.
    pub fn timer_active(&self) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    /// Cancel the timer and drop the sink. Safe to call repeatedly.
    pub fn close(&self) {
        if let Some(timer) = &self.timer {
            timer.abort();
        }
        if self.shared.close() {
            info!(session = %self.id, ticker = %self.ticker, "live feed closed");
        }
    }
}

impl Drop for LiveFeedSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for LiveFeedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveFeedSession")
            .field("id", &self.id)
            .field("ticker", &self.ticker)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl LiveSample {
    fn draw(ticker: &Ticker, baseline: f64, simulator: &ScoreSimulator) -> Self {
        let sample = simulator.sample(baseline);
        Self {
            ticker: ticker.clone(),
            score: sample.score,
            change: sample.change,
            timestamp: UtcDateTime::now(),
        }
    }
}
