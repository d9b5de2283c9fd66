use std::io::Write;

/// Where the terminal title can be set.
///
/// Resolved once when a session starts (see [`TitleTarget::detect`]) and
/// passed to the [`Titlebar`], instead of checking the environment on every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleTarget {
    /// xterm-compatible terminal, title is set with an escape sequence on stdout
    Xterm,
    /// Native console title API (Windows)
    Console,
    /// Setting the title is not supported
    None,
}

impl TitleTarget {
    /// Detect the target from the `TERM` environment variable
    pub fn detect() -> Self {
        let term = std::env::var("TERM").ok();
        let target = Self::from_term(term.as_deref());
        crate::trace!("title target: {target:?} (TERM={term:?})");
        target
    }

    /// Resolve the target from the value of `TERM`
    pub fn from_term(term: Option<&str>) -> Self {
        match term {
            Some(term) if term.starts_with("xterm") => Self::Xterm,
            _ if cfg!(windows) => Self::Console,
            _ => Self::None,
        }
    }
}

/// Sets the terminal title to the progress message
#[derive(Debug, Clone, Copy)]
pub struct Titlebar {
    target: TitleTarget,
}

impl Titlebar {
    pub fn new(target: TitleTarget) -> Self {
        Self { target }
    }

    /// Create a titlebar for the current terminal
    pub fn detect() -> Self {
        Self::new(TitleTarget::detect())
    }

    #[inline(always)]
    pub fn target(&self) -> TitleTarget {
        self.target
    }

    /// Set the title. Failures are ignored
    pub fn set(&self, text: &str) {
        match self.target {
            TitleTarget::Xterm => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = write_xterm_title(&mut stdout, text).and_then(|_| stdout.flush()) {
                    crate::trace!("failed to set terminal title: {e}");
                }
            }
            TitleTarget::Console => set_console_title(text),
            TitleTarget::None => {}
        }
    }
}

/// Write the xterm escape sequence that sets the window title
pub fn write_xterm_title(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    write!(out, "\x1b]0;{text}\x07")
}

#[cfg(windows)]
fn set_console_title(text: &str) {
    use std::os::windows::ffi::OsStrExt as _;

    let wide: Vec<u16> = std::ffi::OsStr::new(text)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    // SAFETY: the buffer is nul-terminated and outlives the call
    let ok = unsafe { windows_sys::Win32::System::Console::SetConsoleTitleW(wide.as_ptr()) };
    if ok == 0 {
        crate::trace!("failed to set console title");
    }
}

#[cfg(not(windows))]
fn set_console_title(_: &str) {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_term() {
        assert_eq!(TitleTarget::from_term(Some("xterm")), TitleTarget::Xterm);
        assert_eq!(TitleTarget::from_term(Some("xterm-256color")), TitleTarget::Xterm);
        #[cfg(not(windows))]
        {
            assert_eq!(TitleTarget::from_term(Some("dumb")), TitleTarget::None);
            assert_eq!(TitleTarget::from_term(None), TitleTarget::None);
        }
        #[cfg(windows)]
        assert_eq!(TitleTarget::from_term(None), TitleTarget::Console);
    }

    #[test]
    fn test_xterm_escape() {
        let mut out = Vec::new();
        write_xterm_title(&mut out, "1m05s (50%)").unwrap();
        assert_eq!(out, b"\x1b]0;1m05s (50%)\x07");
    }
}
