//! Per-client request budget enforced as axum middleware.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tracing::{debug, warn};

use crate::error::ApiError;

pub type IpRateLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// Checks between sweeps of idle client entries.
pub const PRUNE_EVERY: u64 = 1_024;

/// Keyed limiter allowing a fixed number of requests per window for each client IP.
///
/// Client entries whose budget has fully replenished are swept every
/// [`PRUNE_EVERY`] checks so the key store tracks only recent clients.
pub struct ClientBudget {
    limiter: IpRateLimiter,
    checks: AtomicU64,
}

impl ClientBudget {
    /// Consume one request from `ip`'s budget; `false` when exhausted.
    pub fn check(&self, ip: IpAddr) -> bool {
        let seen = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if seen % PRUNE_EVERY == 0 {
            self.prune();
        }
        self.limiter.check_key(&ip).is_ok()
    }

    /// Drop entries indistinguishable from a fresh client.
    pub fn prune(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        debug!(before, after = self.limiter.len(), "pruned rate limit entries");
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Budget allowing `limit` requests per `window` for each client IP.
pub fn ip_rate_limiter(window: Duration, limit: u32) -> Arc<ClientBudget> {
    Arc::new(ClientBudget {
        limiter: RateLimiter::keyed(quota_from_window(window, limit)),
        checks: AtomicU64::new(0),
    })
}

fn quota_from_window(window: Duration, limit: u32) -> Quota {
    let burst = NonZeroU32::new(limit).unwrap_or(NonZeroU32::MIN);

    let seconds_per_cell = (window.as_secs_f64() / f64::from(burst.get())).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .map(|quota| quota.allow_burst(burst))
        .unwrap_or_else(|| Quota::per_second(burst))
}

/// Requests without connection info (in-process callers) share the loopback budget.
pub async fn limit_by_ip(
    State(budget): State<Arc<ClientBudget>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    if !budget.check(ip) {
        warn!(client = %ip, path = %request.uri().path(), "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(request).await
}
