//! Simulate a build with a few worker threads and show the estimate.
//!
//! Press Ctrl-C to stop early.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pistonite_eta as eta;

const RULES: u64 = 40;
const WORKERS: u64 = 4;

fn main() -> eta::Result<()> {
    eta::log_init("v");
    let cancel = eta::CancelToken::on_ctrlc()?;

    // half the rules were built before and have known times
    let progress = Arc::new(Mutex::new(eta::Snapshot {
        count_todo: RULES,
        time_todo: (RULES as f64 / 2.0 * 0.4, RULES / 2),
        ..Default::default()
    }));

    let config = eta::ProgressConfig::default()
        .interval(Duration::from_millis(500))
        .program("");
    let mut title = eta::config_sink(&config);
    let display = {
        let progress = Arc::clone(&progress);
        eta::spawn_display(
            config,
            move || progress.lock().map(|p| p.clone()).unwrap_or_default(),
            move |message| {
                println!("{message}");
                title(message);
            },
        )?
    };

    let workers = (0..WORKERS)
        .map(|id| {
            let progress = Arc::clone(&progress);
            let cancel = cancel.clone();
            std::thread::spawn(move || {
                for rule in (id..RULES).step_by(WORKERS as usize) {
                    if cancel.is_cancelled() {
                        return;
                    }
                    // rules with unknown time take a bit longer
                    let unknown = rule % 2 == 1;
                    let secs = if unknown { 0.6 } else { 0.4 };
                    std::thread::sleep(Duration::from_secs_f64(secs));
                    let Ok(mut p) = progress.lock() else {
                        return;
                    };
                    p.count_todo -= 1;
                    p.count_built += 1;
                    p.time_built += secs;
                    if unknown {
                        p.time_todo.1 -= 1;
                    } else {
                        p.time_todo.0 -= 0.4;
                    }
                }
            })
        })
        .collect::<Vec<_>>();

    for worker in workers {
        let _ = worker.join();
    }
    display.stop()?;
    Ok(())
}
