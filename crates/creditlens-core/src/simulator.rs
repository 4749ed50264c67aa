//! Jittered "current score" derivation.
//!
//! Every call draws an independent sample around the static baseline; nothing
//! is remembered between calls, so repeated samples never drift.

use serde::Serialize;

use crate::statistics::Direction;
use crate::ValidationError;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// One simulated score reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSample {
    /// Clamped to `[0, 100]` and rounded to two decimals.
    pub score: f64,
    /// Raw jitter applied to the baseline, rounded to two decimals.
    pub change: f64,
}

impl ScoreSample {
    /// Sign of the rounded `change`, so sub-cent jitter reads as stable.
    pub fn direction(&self) -> Direction {
        Direction::from_change(self.change)
    }
}

/// Stateless sampler drawing uniform jitter in `[-amplitude / 2, amplitude / 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSimulator {
    amplitude: f64,
}

impl ScoreSimulator {
    pub fn new(amplitude: f64) -> Result<Self, ValidationError> {
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(ValidationError::InvalidConfig {
                field: "amplitude",
                reason: format!("must be finite and non-negative, got {amplitude}"),
            });
        }
        Ok(Self { amplitude })
    }

    pub const fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn sample(&self, baseline: f64) -> ScoreSample {
        self.sample_with(baseline, fastrand::f64())
    }

    /// Deterministic core of [`sample`](Self::sample); `unit` is a draw from `[0, 1)`.
    pub fn sample_with(&self, baseline: f64, unit: f64) -> ScoreSample {
        let jitter = (unit - 0.5) * self.amplitude;
        let raw = baseline + jitter;
        let clamped = if raw.is_finite() {
            raw.clamp(MIN_SCORE, MAX_SCORE)
        } else {
            MIN_SCORE
        };

        ScoreSample {
            score: round2(clamped),
            change: round2(jitter),
        }
    }
}

/// Round to two decimals, folding negative zero into zero.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
