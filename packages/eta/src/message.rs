//! Turning a stream of snapshots into a status line
//!
//! The derived quantities, all streams over [`Snapshot`]:
//! - `done`: seconds spent building in this run. Time of skipped rules is
//!   left out, otherwise the percentage jumps backwards when a build
//!   starts with many valid rules.
//! - `guess`: assumed seconds for a rule whose time is not known, a fast
//!   decayed average of known time per known rule.
//! - `todo`: predicted seconds of work left.
//! - `step`: wall seconds since the session started.
//! - `work`: slow decayed average of `done / step`, i.e. build seconds
//!   completed per wall second.
//! - `real_work`: `work`, but frozen on ticks where `done` did not change,
//!   and `1` before anything is done.
use std::fmt::Write as _;

use crate::ProgressConfig;
use crate::decay::decay;
use crate::snapshot::Snapshot;
use crate::stream::{Stream, branch, latch, lift3, position, with_previous};

/// One estimate produced by the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Predicted wall seconds until the build is done
    pub remaining_secs: f64,
    /// Completion percentage, 0 to 100
    pub percent: u32,
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}%)", format_remaining(self.remaining_secs), self.percent)
    }
}

/// Format seconds as `MmSSs`, rounding up.
///
/// Minutes are omitted when zero.
/// ```rust
/// # use pistonite_eta as eta;
/// assert_eq!(eta::format_remaining(0.0), "0s");
/// assert_eq!(eta::format_remaining(4.2), "5s");
/// assert_eq!(eta::format_remaining(65.0), "1m05s");
/// ```
pub fn format_remaining(secs: f64) -> String {
    let mut out = String::new();
    let secs = if secs.is_finite() && secs > 0.0 {
        secs.ceil() as u64
    } else {
        0
    };
    let (mins, secs) = (secs / 60, secs % 60);
    // _: fmt for string does not fail
    let _ = if mins == 0 {
        write!(out, "{secs}s")
    } else {
        write!(out, "{mins}m{secs:02}s")
    };
    out
}

/// Completion percentage, rounded down. `0` when nothing is done
pub fn percent(done: f64, todo: f64) -> u32 {
    if done == 0.0 {
        return 0;
    }
    let percent = (100.0 * done / (done + todo)).floor();
    if percent.is_finite() {
        percent.clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

/// Stateful pipeline from snapshots to estimates.
///
/// Create one per display session and feed it one snapshot per tick.
pub struct MessagePipeline {
    stream: Stream<Snapshot, Estimate>,
}

impl MessagePipeline {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            stream: estimate(config),
        }
    }

    /// Advance one tick
    #[inline(always)]
    pub fn next(&mut self, snapshot: &Snapshot) -> Estimate {
        self.stream.next(snapshot)
    }

    /// Advance one tick and format the status message as `"<time> (<percent>%)"`
    pub fn message(&mut self, snapshot: &Snapshot) -> String {
        self.next(snapshot).to_string()
    }
}

/// Build the estimate stream
pub fn estimate(config: &ProgressConfig) -> Stream<Snapshot, Estimate> {
    lift3(
        |done, todo, real_work| Estimate {
            remaining_secs: todo / real_work,
            percent: percent(done, todo),
        },
        done(),
        todo(config.guess_decay),
        real_work(config.interval.as_secs_f64(), config.work_decay),
    )
}

fn field(f: fn(&Snapshot) -> f64) -> Stream<Snapshot, f64> {
    Stream::new(f)
}

fn done() -> Stream<Snapshot, f64> {
    field(|p| p.time_built)
}

fn is_zero(s: Stream<Snapshot, f64>) -> Stream<Snapshot, bool> {
    s.map(|x| x == 0.0)
}

/// Assumed time for a rule that has never been built
fn guess(factor: f64) -> Stream<Snapshot, f64> {
    let samples = || {
        field(|p| (p.count_built + p.count_todo).saturating_sub(p.time_todo.1) as f64)
    };
    let time = field(|p| p.time_built + p.time_todo.0);
    branch(
        is_zero(samples()),
        Stream::constant(0.0),
        decay(factor, time, samples()),
    )
}

fn todo(guess_factor: f64) -> Stream<Snapshot, f64> {
    let known = field(|p| p.time_todo.0);
    let unknown = field(|p| p.time_todo.1 as f64);
    known + unknown * guess(guess_factor)
}

fn step(interval_secs: f64) -> Stream<Snapshot, f64> {
    position().map(move |x| x as f64 * interval_secs)
}

fn work(interval_secs: f64, factor: f64) -> Stream<Snapshot, f64> {
    decay(factor, done(), step(interval_secs))
}

fn real_work(interval_secs: f64, factor: f64) -> Stream<Snapshot, f64> {
    let unchanged = with_previous(0.0, done()).map(|(prev, cur)| prev == cur);
    branch(
        is_zero(done()),
        Stream::constant(1.0),
        latch(unchanged.zip(work(interval_secs, factor))),
    )
}
