//! Statistics over score series and data-source health.
//!
//! All functions are total: empty input, a zero baseline, or zero sources map
//! to defined fallbacks and never to NaN or infinity.
//!
//! | Function | Empty / degenerate input |
//! |----------|--------------------------|
//! | [`volatility`] | `0.0` for fewer than two points |
//! | [`trend`] | [`Direction::Stable`] for fewer than two points or a zero first point |
//! | [`mean`] | `0.0` for an empty series |
//! | [`overall_health`] | [`OverallHealth::Poor`] when no sources are counted |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CompanyRecord, SourceCategory, SourceState};

/// Percent move between first and last point beyond which a series trends.
pub const TREND_THRESHOLD_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stable,
}

impl Direction {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Stable
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl OverallHealth {
    pub fn from_healthy_pct(pct: f64) -> Self {
        if !pct.is_finite() {
            return Self::Poor;
        }
        if pct >= 90.0 {
            Self::Excellent
        } else if pct >= 75.0 {
            Self::Good
        } else if pct >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Per-category tally of source states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub healthy: u32,
    pub degraded: u32,
    pub offline: u32,
}

impl StatusCounts {
    pub fn new(healthy: u32, degraded: u32, offline: u32) -> Self {
        Self {
            healthy,
            degraded,
            offline,
        }
    }

    pub fn record(&mut self, state: SourceState) {
        let slot = match state {
            SourceState::Healthy => &mut self.healthy,
            SourceState::Degraded => &mut self.degraded,
            SourceState::Offline => &mut self.offline,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        u64::from(self.healthy) + u64::from(self.degraded) + u64::from(self.offline)
    }
}

pub type HealthSummary = BTreeMap<SourceCategory, StatusCounts>;

pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Population standard deviation (divides by N).
pub fn volatility(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let avg = mean(scores);
    let variance = scores
        .iter()
        .map(|score| (score - avg).powi(2))
        .sum::<f64>()
        / scores.len() as f64;
    variance.sqrt()
}

/// Classifies the percent change from the first to the last point.
pub fn trend(scores: &[f64]) -> Direction {
    let (Some(&first), Some(&last)) = (scores.first(), scores.last()) else {
        return Direction::Stable;
    };
    if scores.len() < 2 || first == 0.0 {
        return Direction::Stable;
    }

    let pct = (last - first) / first * 100.0;
    if !pct.is_finite() {
        Direction::Stable
    } else if pct > TREND_THRESHOLD_PCT {
        Direction::Up
    } else if pct < -TREND_THRESHOLD_PCT {
        Direction::Down
    } else {
        Direction::Stable
    }
}

/// Healthy share across every category, classified by threshold.
pub fn overall_health<'a, I>(counts: I) -> OverallHealth
where
    I: IntoIterator<Item = &'a StatusCounts>,
{
    let (healthy, total) = counts
        .into_iter()
        .fold((0_u64, 0_u64), |(healthy, total), c| {
            (healthy + u64::from(c.healthy), total + c.total())
        });

    if total == 0 {
        return OverallHealth::Poor;
    }
    OverallHealth::from_healthy_pct(healthy as f64 / total as f64 * 100.0)
}

/// Tally every company's source states by known category. Unknown keys are skipped.
pub fn aggregate_source_health<'a, I>(records: I) -> HealthSummary
where
    I: IntoIterator<Item = &'a CompanyRecord>,
{
    let mut summary: HealthSummary = SourceCategory::ALL
        .into_iter()
        .map(|category| (category, StatusCounts::default()))
        .collect();

    for record in records {
        for (key, source) in &record.data_source_health {
            let Some(category) = SourceCategory::from_key(key) else {
                continue;
            };
            summary.entry(category).or_default().record(source.status);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn volatility_of_short_or_flat_series_is_zero() {
        assert_eq!(volatility(&[]), 0.0);
        assert_eq!(volatility(&[42.0]), 0.0);
        assert_eq!(volatility(&[10.0, 10.0, 10.0]), 0.0);
    }

    #[test]
    fn volatility_uses_population_denominator() {
        assert!(close(volatility(&[0.0, 10.0]), 5.0));
        assert!(close(volatility(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0));
    }

    #[test]
    fn trend_thresholds() {
        assert_eq!(trend(&[]), Direction::Stable);
        assert_eq!(trend(&[80.0]), Direction::Stable);
        assert_eq!(trend(&[100.0, 103.0]), Direction::Up);
        assert_eq!(trend(&[100.0, 97.0]), Direction::Down);
        assert_eq!(trend(&[100.0, 101.0]), Direction::Stable);
        assert_eq!(trend(&[100.0, 102.0]), Direction::Stable);
    }

    #[test]
    fn trend_only_compares_endpoints() {
        assert_eq!(trend(&[100.0, 50.0, 150.0, 101.0]), Direction::Stable);
    }

    #[test]
    fn trend_with_zero_first_point_is_stable() {
        assert_eq!(trend(&[0.0, 10.0]), Direction::Stable);
        assert_eq!(trend(&[0.0, 0.0]), Direction::Stable);
    }

    #[test]
    fn mean_of_empty_series_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert!(close(mean(&[1.0, 2.0, 3.0]), 2.0));
    }

    #[test]
    fn overall_health_thresholds() {
        assert_eq!(
            overall_health(Vec::<StatusCounts>::new().iter()),
            OverallHealth::Poor
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(0, 0, 0)]),
            OverallHealth::Poor
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(10, 0, 0)]),
            OverallHealth::Excellent
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(90, 5, 5)]),
            OverallHealth::Excellent
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(89, 11, 0)]),
            OverallHealth::Good
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(3, 1, 0), StatusCounts::new(0, 0, 0)]),
            OverallHealth::Good
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(1, 1, 0)]),
            OverallHealth::Fair
        );
        assert_eq!(
            overall_health(&[StatusCounts::new(1, 1, 1)]),
            OverallHealth::Poor
        );
    }

    #[test]
    fn overall_health_sums_across_categories() {
        let summary = [StatusCounts::new(9, 0, 0), StatusCounts::new(0, 0, 1)];
        assert_eq!(overall_health(&summary), OverallHealth::Excellent);
    }

    #[test]
    fn status_counts_record_each_state() {
        let mut counts = StatusCounts::default();
        counts.record(SourceState::Healthy);
        counts.record(SourceState::Offline);
        counts.record(SourceState::Offline);
        assert_eq!(counts, StatusCounts::new(1, 0, 2));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn direction_from_change() {
        assert_eq!(Direction::from_change(0.01), Direction::Up);
        assert_eq!(Direction::from_change(-0.01), Direction::Down);
        assert_eq!(Direction::from_change(0.0), Direction::Stable);
    }
}
