#![cfg(feature = "coroutine")]
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pistonite_eta as eta;

#[tokio::test]
async fn test_co_display_cancel_cuts_wait() {
    let cancel = eta::CancelToken::new();
    let messages = Arc::new(Mutex::new(Vec::new()));
    let task = {
        let cancel = cancel.clone();
        let messages = Arc::clone(&messages);
        tokio::spawn(async move {
            let config = eta::ProgressConfig::default().interval(Duration::from_secs(60));
            eta::co::display(
                &config,
                eta::Snapshot::default,
                |m| messages.lock().unwrap().push(m.to_string()),
                &cancel,
            )
            .await
        })
    };
    let start = Instant::now();
    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();
    task.await.unwrap();
    assert!(start.elapsed() < Duration::from_secs(30));
    assert_eq!(*messages.lock().unwrap(), ["Starting...", "Finished"]);
}

#[tokio::test]
async fn test_co_display_samples_in_order() {
    let cancel = eta::CancelToken::new();
    let mut messages = Vec::new();
    let mut tick = 0u64;
    let accessor = {
        let cancel = cancel.clone();
        move || {
            tick += 1;
            if tick == 4 {
                cancel.cancel();
            }
            eta::Snapshot {
                count_built: tick,
                count_todo: 4 - tick,
                time_built: tick as f64,
                time_todo: ((4 - tick) as f64, 0),
                ..Default::default()
            }
        }
    };
    let config = eta::ProgressConfig::default()
        .interval(Duration::from_millis(1))
        .sleep(false);
    eta::co::display(&config, accessor, |m| messages.push(m.to_string()), &cancel).await;
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0], "Starting...");
    for (i, percent) in [25, 50, 75, 100].into_iter().enumerate() {
        let expected = format!("({percent}%)");
        assert!(messages[i + 1].ends_with(&expected), "{}", messages[i + 1]);
    }
    assert_eq!(messages[5], "Finished");
}
