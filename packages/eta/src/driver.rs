//! # Display driver
//!
//! The driver owns the sampling cadence. One display session looks like:
//! ```txt
//! Starting...               <- emitted right away
//! (wait) (sample) message   <- repeated until cancelled
//! Finished                  <- emitted once cancelled
//! ```
//! Cancellation is the only way out of the loop, and the `Finished` message
//! is always emitted on the way out.
use std::thread::JoinHandle;

use crate::{CancelToken, Context as _, MessagePipeline, ProgressConfig, Snapshot};

/// Message emitted when a session starts, before any sample
pub const STARTING: &str = "Starting...";
/// Message emitted when a session is cancelled
pub const FINISHED: &str = "Finished";
/// Separator between the estimate and the name of the failed target
pub const FAILURE_MARKER: &str = ", Failure! ";

/// State of a display session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Starting,
    Running,
    Finished,
}

/// The state machine of a display session, without the waiting.
///
/// [`display`] and [`spawn_display`] drive this with a timer.
pub struct Driver {
    state: DriverState,
    pipeline: MessagePipeline,
}

impl Driver {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            state: DriverState::Starting,
            pipeline: MessagePipeline::new(config),
        }
    }

    #[inline(always)]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Enter `Running`, returning the message to show before any sample
    pub fn start(&mut self) -> &'static str {
        self.state = DriverState::Running;
        STARTING
    }

    /// Advance the estimate with the next sample and return the message to show.
    ///
    /// A finished session stays finished: the sample is ignored and the
    /// `Finished` message is returned again.
    pub fn tick(&mut self, snapshot: &Snapshot) -> String {
        match self.state {
            DriverState::Starting => self.state = DriverState::Running,
            DriverState::Running => {}
            DriverState::Finished => {
                crate::debug!("ignoring progress sample after the session finished");
                return FINISHED.to_string();
            }
        }
        let mut message = self.pipeline.message(snapshot);
        if let Some(failure) = snapshot.is_failure() {
            message.push_str(FAILURE_MARKER);
            message.push_str(failure);
        }
        message
    }

    /// Enter `Finished`, returning the message to show
    pub fn finish(&mut self) -> &'static str {
        self.state = DriverState::Finished;
        FINISHED
    }
}

/// Run a display session on the current thread until `cancel` is cancelled.
///
/// Each cycle waits for the sampling interval, fetches a snapshot with `snapshot`,
/// and calls `sink` with the message. The sink call finishes before the next
/// cycle starts, so messages are never reordered or dropped.
pub fn display<F, S>(config: &ProgressConfig, mut snapshot: F, mut sink: S, cancel: &CancelToken)
where
    F: FnMut() -> Snapshot,
    S: FnMut(&str),
{
    let mut driver = Driver::new(config);
    sink(driver.start());
    loop {
        let cancelled = if config.sleep {
            cancel.wait_timeout(config.interval)
        } else {
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

/// Run a display session on a background thread.
///
/// The session runs until the returned handle is stopped or dropped.
///
/// ```rust,no_run
/// # use pistonite_eta as eta;
/// # fn main() -> eta::Result<()> {
/// let handle = eta::spawn_display(
///     eta::ProgressConfig::default(),
///     eta::Snapshot::default,
///     |message| println!("{message}"),
/// )?;
/// // ... build ...
/// handle.stop()?; // "Finished" has been printed when this returns
/// # Ok(()) }
/// ```
pub fn spawn_display<F, S>(config: ProgressConfig, snapshot: F, sink: S) -> crate::Result<DisplayHandle>
where
    F: FnMut() -> Snapshot + Send + 'static,
    S: FnMut(&str) + Send + 'static,
{
    config.validate()?;
    let cancel = CancelToken::new();
    let thread = {
        let cancel = cancel.clone();
        std::thread::Builder::new()
            .name("eta-display".to_string())
            .spawn(move || display(&config, snapshot, sink, &cancel))
            .context("failed to spawn progress display thread")?
    };
    Ok(DisplayHandle {
        cancel,
        thread: Some(thread),
    })
}

/// Handle to a display session running in the background
pub struct DisplayHandle {
    cancel: CancelToken,
    thread: Option<JoinHandle<()>>,
}

impl DisplayHandle {
    /// The cancellation token of the session
    #[inline(always)]
    pub fn token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Cancel the session and wait for it to emit the final message
    pub fn stop(mut self) -> crate::Result<()> {
        self.stop_internal()
    }

    fn stop_internal(&mut self) -> crate::Result<()> {
        self.cancel.cancel();
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        if let Err(e) = thread.join() {
            crate::bail!("progress display thread panicked: {}", panic_message(&*e));
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic info"
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop_internal() {
            crate::error!("{e:?}");
        }
    }
}
