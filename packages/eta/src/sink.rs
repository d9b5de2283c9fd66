//! Ready-made display sinks
use crate::{DisplayHandle, ProgressConfig, Snapshot, Titlebar};

/// Sink that sets the terminal title, if the terminal supports it
pub fn titlebar_sink() -> impl FnMut(&str) + Send + 'static {
    let titlebar = Titlebar::detect();
    move |message| titlebar.set(message)
}

/// Sink that forwards to `shake-progress`, if it is in `PATH`
#[cfg(feature = "program")]
pub fn program_sink() -> impl FnMut(&str) + Send + 'static {
    let mut program = crate::ProgressProgram::find();
    move |message| {
        program.notify(message);
    }
}

/// Sink that sets the terminal title and forwards to `shake-progress`
pub fn simple_sink() -> impl FnMut(&str) + Send + 'static {
    config_sink(&ProgressConfig::default())
}

/// Sink with the presentation options in `config`: the terminal title
/// if `titlebar` is set, and the progress program named by `program` if not empty.
pub fn config_sink(config: &ProgressConfig) -> impl FnMut(&str) + Send + use<> {
    let titlebar = config.titlebar.then(Titlebar::detect);
    #[cfg(feature = "program")]
    let mut program = crate::ProgressProgram::find_named(&config.program);
    #[cfg(not(feature = "program"))]
    {
        if !config.program.is_empty() {
            crate::debug!("progress program is not supported without the `program` feature");
        }
    }
    move |message| {
        if let Some(titlebar) = &titlebar {
            titlebar.set(message);
        }
        #[cfg(feature = "program")]
        {
            program.notify(message);
        }
    }
}

/// Show progress in the terminal title and with `shake-progress`,
/// sampling every 5 seconds, until the handle is stopped.
pub fn progress_simple<F>(snapshot: F) -> crate::Result<DisplayHandle>
where
    F: FnMut() -> Snapshot + Send + 'static,
{
    crate::spawn_display(ProgressConfig::default(), snapshot, simple_sink())
}
