//! # Async display
//!
//! Same session as [`display`](crate::display), but the wait between samples
//! is a [`tokio`](https://docs.rs/tokio) timer, so the session can run as a task
//! on an async runtime without holding up a thread.
//!
//! ```rust,no_run
//! # use pistonite_eta as eta;
//! # async fn example() {
//! let cancel = eta::CancelToken::new();
//! let task = {
//!     let cancel = cancel.clone();
//!     tokio::spawn(async move {
//!         let config = eta::ProgressConfig::default();
//!         eta::co::display(&config, eta::Snapshot::default, |m| println!("{m}"), &cancel).await
//!     })
//! };
//! // ... build ...
//! cancel.cancel();
//! let _ = task.await;
//! # }
//! ```

use crate::{CancelToken, Driver, ProgressConfig, Snapshot};

/// Run a display session until `cancel` is cancelled.
///
/// The snapshot accessor and the sink are synchronous. They are called on the
/// task driving this future and should return promptly.
pub async fn display<F, S>(config: &ProgressConfig, mut snapshot: F, mut sink: S, cancel: &CancelToken)
where
    F: FnMut() -> Snapshot,
    S: FnMut(&str),
{
    let mut driver = Driver::new(config);
    sink(driver.start());
    loop {
        let cancelled = if config.sleep {
            cancel.co_wait_timeout(config.interval).await
        } else {
            // still yield so a busy session does not starve the runtime
            tokio::task::yield_now().await;
            cancel.is_cancelled()
        };
        if cancelled {
            break;
        }
        let current = snapshot();
        let message = driver.tick(&current);
        crate::trace!("progress: {message}");
        sink(&message);
    }
    crate::debug!("progress display cancelled");
    sink(driver.finish());
}
