//! Server settings.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `CREDITLENS_HOST` | `host` | `0.0.0.0` |
//! | `PORT` | `port` | `3000` |
//! | `CREDITLENS_RATE_LIMIT_MAX` | `rate_limit_max` | `1000` |
//! | `CREDITLENS_ALLOWED_ORIGINS` | `allowed_origins` | any origin |
//!
//! Command-line flags take precedence over the environment.

use std::env;
use std::time::Duration;

/// Rate limit accounting window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rate_limit_window: Duration,
    /// Requests allowed per client IP within one window.
    pub rate_limit_max: u32,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            rate_limit_window: RATE_LIMIT_WINDOW,
            rate_limit_max: 1000,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("CREDITLENS_HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(defaults.port);
        let rate_limit_max = env::var("CREDITLENS_RATE_LIMIT_MAX")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(defaults.rate_limit_max);
        let allowed_origins = env::var("CREDITLENS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Self {
            host,
            port,
            rate_limit_window: defaults.rate_limit_window,
            rate_limit_max,
            allowed_origins,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
