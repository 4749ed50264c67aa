//! Liveness probe: `GET /api/health`.

use axum::extract::State;
use axum::Json;
use creditlens_core::UtcDateTime;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: UtcDateTime,
    pub version: &'static str,
    pub uptime_secs: u64,
    /// Live feed timers currently scheduled.
    pub active_streams: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    tracing::info!("health check requested");
    Json(HealthResponse {
        status: "healthy",
        timestamp: UtcDateTime::now(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
        active_streams: state.facade.active_streams(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let response = HealthResponse {
            status: "healthy",
            timestamp: UtcDateTime::now(),
            version: "0.1.0",
            uptime_secs: 12,
            active_streams: 0,
        };
        let json = serde_json::to_string(&response).expect("json");
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"uptimeSecs\":12"));
        assert!(json.contains("\"activeStreams\":0"));
    }
}
