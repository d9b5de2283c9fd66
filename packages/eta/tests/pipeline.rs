use std::time::Duration;

use pistonite_eta as eta;

fn config() -> eta::ProgressConfig {
    eta::ProgressConfig::default().interval(Duration::from_secs(1))
}

/// 10 rules of 10 seconds each, one finished per second
fn linear_build(tick: u64) -> eta::Snapshot {
    eta::Snapshot {
        count_built: tick,
        count_todo: 10 - tick,
        time_built: 10.0 * tick as f64,
        time_todo: (100.0 - 10.0 * tick as f64, 0),
        ..Default::default()
    }
}

#[test]
fn test_linear_build_percent() {
    let mut pipeline = eta::MessagePipeline::new(&config());
    let percents = (0..=10)
        .map(|tick| pipeline.next(&linear_build(tick)).percent)
        .collect::<Vec<_>>();
    assert_eq!(percents, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_linear_build_messages() {
    let mut pipeline = eta::MessagePipeline::new(&config());
    let mut last = String::new();
    for tick in 0..=10 {
        last = pipeline.message(&linear_build(tick));
    }
    assert_eq!(last, "0s (100%)");
}

#[test]
fn test_linear_build_remaining_decreases() {
    let mut pipeline = eta::MessagePipeline::new(&config());
    // first tick has nothing built yet
    pipeline.next(&linear_build(0));
    let remaining = (1..=10)
        .map(|tick| pipeline.next(&linear_build(tick)).remaining_secs)
        .collect::<Vec<_>>();
    assert!(remaining.windows(2).all(|w| w[0] > w[1]), "{remaining:?}");
    assert_eq!(remaining.last().copied(), Some(0.0));
}

#[test]
fn test_skipped_time_not_counted() {
    // most of the build was already valid: the percentage only tracks
    // work done in this run
    let snapshot = eta::Snapshot {
        count_skipped: 90,
        time_skipped: 900.0,
        count_built: 1,
        time_built: 10.0,
        count_todo: 9,
        time_todo: (90.0, 0),
        ..Default::default()
    };
    let mut pipeline = eta::MessagePipeline::new(&config());
    assert_eq!(pipeline.next(&snapshot).percent, 10);
}

#[test]
fn test_unknown_rules_use_guess() {
    // 1 rule built in 10s, 1 known rule of 10s left, 2 rules never built
    let snapshot = eta::Snapshot {
        count_built: 1,
        count_todo: 3,
        time_built: 10.0,
        time_todo: (10.0, 2),
        ..Default::default()
    };
    let mut pipeline = eta::MessagePipeline::new(&config());
    let estimate = pipeline.next(&snapshot);
    // guess is 10s per rule, so 30s is left and 10s done
    assert_eq!(estimate.percent, 25);
}

#[test]
fn test_zero_progress_never_divides_by_zero() {
    let snapshot = eta::Snapshot {
        count_todo: 5,
        time_todo: (0.0, 5),
        ..Default::default()
    };
    let mut pipeline = eta::MessagePipeline::new(&config());
    for _ in 0..10 {
        assert_eq!(pipeline.message(&snapshot), "0s (0%)");
    }
}
