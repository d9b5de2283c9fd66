//! # External progress program
//!
//! If an executable named `shake-progress` is in `PATH`, each progress message
//! is forwarded to it, so it can show the progress somewhere else (for example,
//! on the taskbar icon). It is invoked as:
//! ```txt
//! shake-progress --title=<message> --state=<state> [--value=<percent>]
//! ```
//! where `state` is one of `NoProgress`, `Normal` or `Error`, and `--value`
//! is left out for `NoProgress`.
//!
//! The program is not invoked again if both the state and percent are the same
//! as the previous invocation. Failing to run the program is ignored.
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::Context as _;
use crate::driver::FAILURE_MARKER;

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)%").expect("cannot create percent regex"));

/// State reported to the progress program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramState {
    /// The message has no percentage (e.g. starting or finished)
    NoProgress,
    /// Progressing normally
    Normal,
    /// Progressing, but something failed
    Error,
}

impl std::fmt::Display for ProgramState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramState::NoProgress => write!(f, "NoProgress"),
            ProgramState::Normal => write!(f, "Normal"),
            ProgramState::Error => write!(f, "Error"),
        }
    }
}

/// State and percentage parsed from a progress message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramStatus {
    pub state: ProgramState,
    /// The digits before the first `%`, if any
    pub percent: Option<String>,
}

impl ProgramStatus {
    /// Parse the status from a message produced by the display driver
    pub fn parse(message: &str) -> Self {
        let failure = message.contains(FAILURE_MARKER);
        let percent = PERCENT
            .captures(message)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        let state = match (&percent, failure) {
            (None, _) => ProgramState::NoProgress,
            (Some(_), true) => ProgramState::Error,
            (Some(_), false) => ProgramState::Normal,
        };
        Self { state, percent }
    }

    /// Command line arguments to pass to the program
    pub fn args(&self, message: &str) -> Vec<String> {
        let mut args = vec![format!("--title={message}"), format!("--state={}", self.state)];
        if self.state != ProgramState::NoProgress
            && let Some(percent) = &self.percent
        {
            args.push(format!("--value={percent}"));
        }
        args
    }
}

type Launcher = Box<dyn FnMut(&[String]) -> crate::Result<()> + Send>;

/// Forwards progress messages to an external program
pub struct ProgressProgram {
    launcher: Option<Launcher>,
    last: Option<ProgramStatus>,
}

impl ProgressProgram {
    /// Find `shake-progress` in `PATH`. If not found, messages are ignored
    pub fn find() -> Self {
        Self::find_named(crate::config::DEFAULT_PROGRAM)
    }

    /// Find an executable by name in `PATH`. If not found, messages are ignored
    pub fn find_named(name: &str) -> Self {
        if name.is_empty() {
            return Self::disabled();
        }
        match which_program(name) {
            Ok(path) => Self::at(path),
            Err(e) => {
                crate::debug!("progress program disabled: {e:?}");
                Self::disabled()
            }
        }
    }

    /// Use the executable at `path`
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::with_launcher(move |args| run_program(&path, args))
    }

    /// Use a custom function to launch the program with the arguments
    pub fn with_launcher<F>(launcher: F) -> Self
    where
        F: FnMut(&[String]) -> crate::Result<()> + Send + 'static,
    {
        Self {
            launcher: Some(Box::new(launcher)),
            last: None,
        }
    }

    /// Ignore all messages
    pub fn disabled() -> Self {
        Self {
            launcher: None,
            last: None,
        }
    }

    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        self.launcher.is_some()
    }

    /// Forward a message to the program.
    ///
    /// Returns `true` if the program was invoked, `false` if disabled or if the
    /// status is the same as the last invocation.
    pub fn notify(&mut self, message: &str) -> bool {
        let Some(launcher) = self.launcher.as_mut() else {
            return false;
        };
        let status = ProgramStatus::parse(message);
        if self.last.as_ref() == Some(&status) {
            return false;
        }
        let args = status.args(message);
        self.last = Some(status);
        if let Err(e) = launcher(&args) {
            crate::debug!("progress program failed: {e:?}");
        }
        true
    }
}

fn which_program(name: &str) -> crate::Result<PathBuf> {
    crate::trace!("finding executable '{name}' in PATH");
    let path = which::which(name).with_context(|| format!("could not find executable '{name}'"))?;
    crate::debug!("found executable '{name}' -> '{}'", path.display());
    Ok(path)
}

fn run_program(path: &Path, args: &[String]) -> crate::Result<()> {
    crate::trace!("running '{}' with {args:?}", path.display());
    let status = Command::new(path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to run '{}'", path.display()))?;
    crate::ensure!(status.success(), "'{}' exited with {status}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let s = ProgramStatus::parse("1m05s (50%)");
        assert_eq!(s.state, ProgramState::Normal);
        assert_eq!(s.percent.as_deref(), Some("50"));

        let s = ProgramStatus::parse("1m05s (7%), Failure! out/foo.o");
        assert_eq!(s.state, ProgramState::Error);
        assert_eq!(s.percent.as_deref(), Some("7"));

        let s = ProgramStatus::parse("Starting...");
        assert_eq!(s.state, ProgramState::NoProgress);
        assert_eq!(s.percent, None);
    }

    #[test]
    fn test_args() {
        let message = "5s (80%)";
        let args = ProgramStatus::parse(message).args(message);
        assert_eq!(args, ["--title=5s (80%)", "--state=Normal", "--value=80"]);

        let args = ProgramStatus::parse("Finished").args("Finished");
        assert_eq!(args, ["--title=Finished", "--state=NoProgress"]);
    }

    #[test]
    fn test_disabled() {
        let mut program = ProgressProgram::disabled();
        assert!(!program.is_enabled());
        assert!(!program.notify("5s (80%)"));
        assert!(!ProgressProgram::find_named("").is_enabled());
    }
}
