//! Live progress estimation for incremental builds
//!
//! Given periodic [`Snapshot`]s of build bookkeeping (how many rules are built,
//! skipped, pending or unknown, and how long each took), `eta` produces a
//! status line like `1m05s (42%)` predicting the remaining time and the
//! completion percentage, and forwards it somewhere the user can see it.
//!
//! # Estimation
//! The estimate is built from [`stream`]s: small stateful transformers that are
//! advanced once per sample. The remaining time is the predicted remaining
//! build work divided by the observed throughput, where both the time of rules
//! never built before and the throughput are decayed averages (see [`decay`]).
//! Each sample costs constant work and no history is stored.
//!
//! The estimate is best-effort. It is allowed to be wrong and will revise
//! itself as more data comes in.
//!
//! # Display
//! [`display`] runs the sampling loop on the current thread,
//! [`spawn_display`] runs it in the background, and with the `coroutine` feature,
//! [`co::display`] runs it as an async task. All of them take a snapshot accessor
//! and a sink for the messages:
//!
//! ```rust,no_run
//! # use pistonite_eta as eta;
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> eta::Result<()> {
//! let progress = Arc::new(Mutex::new(eta::Snapshot::default()));
//! let handle = {
//!     let progress = Arc::clone(&progress);
//!     eta::progress_simple(move || {
//!         progress.lock().map(|p| p.clone()).unwrap_or_default()
//!     })?
//! };
//! // ... build, updating `progress` ...
//! handle.stop()?;
//! # Ok(()) }
//! ```
//!
//! Ready-made sinks set the terminal title ([`Titlebar`]) and forward to the
//! external `shake-progress` program ([`ProgressProgram`], with the `program` feature).
//!
//! # Cancellation
//! A session stops only when its [`CancelToken`] is cancelled, and always emits a
//! final `Finished` message. With the `ctrlc` feature, [`CancelToken::on_ctrlc`]
//! creates a token cancelled by Ctrl-C.
//!
//! # Logging
//! `eta` logs through [`log`](https://docs.rs/log). [`log_init`] and
//! [`init_print_options`] install a simple stderr logger that also respects `RUST_LOG`.
//!
//! Quick Feature Reference:
//! - `program` (default): Forward messages to the external progress program
//! - `ctrlc`: Cancel sessions with Ctrl-C
//! - `coroutine`: Async display driven by `tokio`
//! - `serde` and `json`: (De)serialize snapshots and config
//! - `cli`: The `eta-replay` binary

pub mod stream;

mod decay;
pub use decay::decay;

mod snapshot;
pub use snapshot::Snapshot;

mod config;
pub use config::{
    DEFAULT_GUESS_DECAY, DEFAULT_INTERVAL, DEFAULT_PROGRAM, DEFAULT_WORK_DECAY, ProgressConfig,
};

mod message;
pub use message::{Estimate, MessagePipeline, estimate, format_remaining, percent};

mod cancel;
pub use cancel::CancelToken;

mod driver;
pub use driver::{
    DisplayHandle, Driver, DriverState, FAILURE_MARKER, FINISHED, STARTING, display, spawn_display,
};

#[cfg(feature = "coroutine")]
pub mod co;

mod title;
pub use title::{TitleTarget, Titlebar, write_xterm_title};

#[cfg(feature = "program")]
mod program;
#[cfg(feature = "program")]
pub use program::{ProgramState, ProgramStatus, ProgressProgram};

mod sink;
#[cfg(feature = "program")]
pub use sink::program_sink;
pub use sink::{config_sink, progress_simple, simple_sink, titlebar_sink};

/// Logging setup
mod print;
pub use print::{PrintLevel, init_print_options, log_init};

// re-exports from libraries
pub use anyhow::{Context, Ok, Result, bail, ensure};
pub use log::{debug, error, info, trace, warn};

/// Prelude imports
pub mod pre {
    pub use crate::Context as _;
}
