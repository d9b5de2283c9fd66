use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pistonite_eta as eta;

fn no_wait() -> eta::ProgressConfig {
    eta::ProgressConfig::default()
        .interval(Duration::from_secs(1))
        .sleep(false)
}

fn linear_build(tick: u64) -> eta::Snapshot {
    eta::Snapshot {
        count_built: tick,
        count_todo: 10 - tick,
        time_built: 10.0 * tick as f64,
        time_todo: (100.0 - 10.0 * tick as f64, 0),
        ..Default::default()
    }
}

/// Run the display on the current thread, cancelling after `samples` samples
fn run(samples: u64, mut snapshot: impl FnMut(u64) -> eta::Snapshot) -> Vec<String> {
    let cancel = eta::CancelToken::new();
    let mut messages = Vec::new();
    let mut tick = 0;
    let accessor = {
        let cancel = cancel.clone();
        move || {
            tick += 1;
            if tick >= samples {
                cancel.cancel();
            }
            snapshot(tick)
        }
    };
    eta::display(&no_wait(), accessor, |m| messages.push(m.to_string()), &cancel);
    messages
}

#[test]
fn test_session_messages() {
    let messages = run(10, linear_build);
    assert_eq!(messages.len(), 12);
    assert_eq!(messages[0], "Starting...");
    assert_eq!(messages[10], "0s (100%)");
    assert_eq!(messages[11], "Finished");
    for (i, message) in messages[1..11].iter().enumerate() {
        let expected = format!("({}%)", (i + 1) * 10);
        assert!(message.ends_with(&expected), "{message}");
    }
}

#[test]
fn test_failure_suffix() {
    let messages = run(3, |tick| {
        let mut snapshot = linear_build(tick);
        if tick >= 2 {
            snapshot.failure = Some("out/foo.o".to_string());
        }
        snapshot
    });
    assert!(!messages[1].contains("Failure!"));
    assert!(messages[2].ends_with("(20%), Failure! out/foo.o"), "{}", messages[2]);
    assert!(messages[3].ends_with("(30%), Failure! out/foo.o"));
    assert_eq!(messages[4], "Finished");
}

#[test]
fn test_cancelled_before_first_sample() {
    let cancel = eta::CancelToken::new();
    cancel.cancel();
    let mut messages = Vec::new();
    eta::display(
        &eta::ProgressConfig::default(),
        || panic!("should not sample after cancelled"),
        |m| messages.push(m.to_string()),
        &cancel,
    );
    assert_eq!(messages, ["Starting...", "Finished"]);
}

#[test]
fn test_driver_state() {
    let mut driver = eta::Driver::new(&no_wait());
    assert_eq!(driver.state(), eta::DriverState::Starting);
    assert_eq!(driver.start(), eta::STARTING);
    assert_eq!(driver.state(), eta::DriverState::Running);
    assert_eq!(driver.tick(&linear_build(0)), "1m40s (0%)");
    assert_eq!(driver.finish(), eta::FINISHED);
    assert_eq!(driver.state(), eta::DriverState::Finished);
}

#[test]
fn test_spawn_display_stops_promptly() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let config = eta::ProgressConfig::default().interval(Duration::from_secs(60));
    let handle = {
        let messages = Arc::clone(&messages);
        eta::spawn_display(config, eta::Snapshot::default, move |m| {
            messages.lock().unwrap().push(m.to_string());
        })
        .unwrap()
    };
    let start = Instant::now();
    std::thread::sleep(Duration::from_millis(20));
    handle.stop().unwrap();
    // cancellation cuts the 60s wait short
    assert!(start.elapsed() < Duration::from_secs(30));
    assert_eq!(*messages.lock().unwrap(), ["Starting...", "Finished"]);
}

#[test]
fn test_spawn_display_samples() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let config = eta::ProgressConfig::default().interval(Duration::from_millis(10));
    let handle = {
        let messages = Arc::clone(&messages);
        eta::spawn_display(config, || linear_build(5), move |m| {
            messages.lock().unwrap().push(m.to_string());
        })
        .unwrap()
    };
    let start = Instant::now();
    while messages.lock().unwrap().len() < 3 {
        assert!(start.elapsed() < Duration::from_secs(30), "no samples");
        std::thread::sleep(Duration::from_millis(5));
    }
    drop(handle);
    let messages = messages.lock().unwrap();
    assert_eq!(messages.first().map(String::as_str), Some("Starting..."));
    assert_eq!(messages.last().map(String::as_str), Some("Finished"));
    assert!(messages[1].ends_with("(50%)"));
}

#[test]
fn test_tick_after_finish_is_ignored() {
    let mut driver = eta::Driver::new(&no_wait());
    driver.start();
    let before = driver.tick(&linear_build(1));
    driver.finish();
    assert_eq!(driver.tick(&linear_build(5)), eta::FINISHED);
    assert_eq!(driver.state(), eta::DriverState::Finished);
    assert!(before.ends_with("(10%)"), "{before}");
}

#[test]
fn test_huge_interval_still_finishes() {
    let cancel = eta::CancelToken::new();
    cancel.cancel();
    let config = eta::ProgressConfig::default().interval(Duration::from_secs(u64::MAX / 2));
    assert!(config.validate().is_ok());
    let mut messages = Vec::new();
    eta::display(
        &config,
        eta::Snapshot::default,
        |m| messages.push(m.to_string()),
        &cancel,
    );
    assert_eq!(messages, ["Starting...", "Finished"]);
}

#[test]
fn test_progress_simple_stops() {
    let samples = Arc::new(Mutex::new(0u64));
    let handle = {
        let samples = Arc::clone(&samples);
        eta::progress_simple(move || {
            *samples.lock().unwrap() += 1;
            linear_build(5)
        })
        .unwrap()
    };
    assert!(!handle.token().is_cancelled());
    let start = Instant::now();
    handle.stop().unwrap();
    // the 5 second default interval is cut short
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(*samples.lock().unwrap(), 0);
}
