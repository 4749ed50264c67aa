//! Numeric properties of the simulator and statistics engine.

use creditlens_core::statistics::{overall_health, trend, volatility};
use creditlens_core::{Direction, OverallHealth, ScoreSimulator, StatusCounts};

#[test]
fn clamped_score_holds_for_every_baseline_and_draw() {
    // Given: The on-demand and streaming amplitudes
    for amplitude in [3.0, 2.0] {
        let simulator = ScoreSimulator::new(amplitude).expect("amplitude");

        // When: Baselines sweep the full range, including both bounds, against extreme draws
        for step in 0..=100 {
            let baseline = f64::from(step);
            for unit in [0.0, 0.25, 0.5, 0.75, 0.999_999] {
                let sample = simulator.sample_with(baseline, unit);

                // Then: The score never leaves [0, 100]
                assert!(
                    (0.0..=100.0).contains(&sample.score),
                    "baseline {baseline} unit {unit} gave {}",
                    sample.score
                );
                assert!(sample.change.abs() <= amplitude / 2.0);
            }
        }
    }
}

#[test]
fn change_reports_raw_jitter_even_when_clamped() {
    let simulator = ScoreSimulator::new(3.0).expect("amplitude");

    let sample = simulator.sample_with(100.0, 0.999_999);

    assert_eq!(sample.score, 100.0);
    assert_eq!(sample.change, 1.5);
    assert_eq!(sample.direction(), Direction::Up);
}

#[test]
fn volatility_reference_values() {
    assert_eq!(volatility(&[]), 0.0);
    for x in [0.0, 42.5, 100.0] {
        assert_eq!(volatility(&[x]), 0.0);
    }
    assert_eq!(volatility(&[10.0, 10.0, 10.0]), 0.0);
    assert_eq!(volatility(&[0.0, 10.0]), 5.0);
}

#[test]
fn trend_reference_values() {
    assert_eq!(trend(&[]), Direction::Stable);
    assert_eq!(trend(&[73.0]), Direction::Stable);
    assert_eq!(trend(&[100.0, 103.0]), Direction::Up);
    assert_eq!(trend(&[100.0, 97.0]), Direction::Down);
    assert_eq!(trend(&[100.0, 101.0]), Direction::Stable);
}

#[test]
fn overall_health_reference_values() {
    let none: [StatusCounts; 0] = [];
    assert_eq!(overall_health(&none), OverallHealth::Poor);
    assert_eq!(
        overall_health(&[StatusCounts::new(6, 0, 0)]),
        OverallHealth::Excellent
    );
    assert_eq!(
        overall_health(&[StatusCounts::new(90, 10, 0)]),
        OverallHealth::Excellent
    );
    assert_eq!(
        overall_health(&[StatusCounts::new(89, 10, 1)]),
        OverallHealth::Good
    );
}
