use std::time::Duration;

/// Default time between two samples, used by the convenience displays
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
/// Decay factor for guessing the time of rules that were never built
pub const DEFAULT_GUESS_DECAY: f64 = 10.0;
/// Decay factor for the observed throughput
pub const DEFAULT_WORK_DECAY: f64 = 1.2;
/// Name of the external progress program looked up in `PATH`
pub const DEFAULT_PROGRAM: &str = "shake-progress";

/// Options for a progress display session
///
/// ```rust
/// # use pistonite_eta as eta;
/// use std::time::Duration;
///
/// let config = eta::ProgressConfig::default()
///     .interval(Duration::from_secs(1))
///     .titlebar(false);
/// assert_eq!(config.interval, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ProgressConfig {
    /// Time between two samples. This is also the elapsed time
    /// the estimator assumes for each tick.
    #[cfg_attr(feature = "serde", serde(with = "secs_f64"))]
    pub interval: Duration,
    /// Wait for `interval` before each sample. Turning this off
    /// makes the display loop run as fast as the sink allows,
    /// while still estimating as if `interval` has passed.
    pub sleep: bool,
    /// Decay factor for guessing the time of rules never built before
    pub guess_decay: f64,
    /// Decay factor for the throughput estimate
    pub work_decay: f64,
    /// Forward messages to the terminal title
    pub titlebar: bool,
    /// Name of the external progress program. Empty to disable
    pub program: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            sleep: true,
            guess_decay: DEFAULT_GUESS_DECAY,
            work_decay: DEFAULT_WORK_DECAY,
            titlebar: true,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[rustfmt::skip]
impl ProgressConfig {
    /// Set the sampling interval
    #[inline(always)]
    pub fn interval(mut self, interval: Duration) -> Self { self.interval = interval; self }
    /// Set if the display loop actually waits between samples
    #[inline(always)]
    pub fn sleep(mut self, sleep: bool) -> Self { self.sleep = sleep; self }
    /// Set the decay factor for guessing unknown rule times
    #[inline(always)]
    pub fn guess_decay(mut self, factor: f64) -> Self { self.guess_decay = factor; self }
    /// Set the decay factor for the throughput estimate
    #[inline(always)]
    pub fn work_decay(mut self, factor: f64) -> Self { self.work_decay = factor; self }
    /// Set if messages are forwarded to the terminal title
    #[inline(always)]
    pub fn titlebar(mut self, titlebar: bool) -> Self { self.titlebar = titlebar; self }
    /// Set the external progress program name. Empty to disable
    #[inline(always)]
    pub fn program(mut self, program: impl Into<String>) -> Self { self.program = program.into(); self }
}

impl ProgressConfig {
    /// Check the options are usable for estimation
    pub fn validate(&self) -> crate::Result<()> {
        crate::ensure!(
            self.guess_decay > 0.0 && self.guess_decay.is_finite(),
            "guess decay factor must be positive, got {}",
            self.guess_decay
        );
        crate::ensure!(
            self.work_decay > 0.0 && self.work_decay.is_finite(),
            "work decay factor must be positive, got {}",
            self.work_decay
        );
        crate::ensure!(!self.interval.is_zero(), "sampling interval must not be zero");
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod secs_f64 {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
