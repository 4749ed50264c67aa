//! Engine tuning knobs.
//!
//! # Environment Variables
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `CREDITLENS_SCORE_AMPLITUDE` | `score_amplitude` | `3.0` |
//! | `CREDITLENS_DETAIL_AMPLITUDE` | `detail_amplitude` | `2.0` |
//! | `CREDITLENS_STREAM_AMPLITUDE` | `stream_amplitude` | `2.0` |
//! | `CREDITLENS_STREAM_PERIOD_MS` | `stream_period` | `5000` |
//! | `CREDITLENS_HISTORY_DAYS` | `default_history_days` | `7` |
//!
//! Unparsable values fall back to the default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Jitter amplitude for on-demand score queries.
    pub score_amplitude: f64,
    /// Jitter amplitude applied to the score in company detail responses.
    pub detail_amplitude: f64,
    /// Jitter amplitude for live feed samples.
    pub stream_amplitude: f64,
    pub stream_period: Duration,
    pub default_history_days: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            score_amplitude: 3.0,
            detail_amplitude: 2.0,
            stream_amplitude: 2.0,
            stream_period: Duration::from_secs(5),
            default_history_days: 7,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            score_amplitude: env_or("CREDITLENS_SCORE_AMPLITUDE", defaults.score_amplitude),
            detail_amplitude: env_or("CREDITLENS_DETAIL_AMPLITUDE", defaults.detail_amplitude),
            stream_amplitude: env_or("CREDITLENS_STREAM_AMPLITUDE", defaults.stream_amplitude),
            stream_period: env_parse::<u64>("CREDITLENS_STREAM_PERIOD_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.stream_period),
            default_history_days: env_or(
                "CREDITLENS_HISTORY_DAYS",
                defaults.default_history_days,
            ),
        }
    }

    pub fn with_stream_period(mut self, period: Duration) -> Self {
        self.stream_period = period;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("score_amplitude", self.score_amplitude),
            ("detail_amplitude", self.detail_amplitude),
            ("stream_amplitude", self.stream_amplitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidConfig {
                    field,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }

        if self.stream_period.is_zero() {
            return Err(ValidationError::InvalidConfig {
                field: "stream_period",
                reason: "must be greater than zero".to_owned(),
            });
        }

        if self.default_history_days == 0 {
            return Err(ValidationError::InvalidConfig {
                field: "default_history_days",
                reason: "must be greater than zero".to_owned(),
            });
        }

        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_parse(key).unwrap_or(default)
}
