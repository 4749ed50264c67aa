use std::time::Instant;

use creditlens_core::QueryFacade;

/// Shared handler state. Cloning is cheap; the dataset sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub facade: QueryFacade,
    started: Instant,
}

impl AppState {
    pub fn new(facade: QueryFacade) -> Self {
        Self {
            facade,
            started: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
