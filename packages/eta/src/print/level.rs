/// Print level, usually set with `-v` and `-q` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PrintLevel {
    QuietQuiet,
    Quiet,
    Normal,
    Verbose,
    VerboseVerbose,
}
impl From<i8> for PrintLevel {
    fn from(value: i8) -> Self {
        match value {
            ..=-2 => Self::QuietQuiet,
            -1 => Self::Quiet,
            0 => Self::Normal,
            1 => Self::Verbose,
            2.. => Self::VerboseVerbose,
        }
    }
}
impl From<&str> for PrintLevel {
    /// `qq`, `q`, `v` and `vv` map to the corresponding levels,
    /// anything else is `Normal`
    fn from(value: &str) -> Self {
        match value {
            "qq" => Self::QuietQuiet,
            "q" => Self::Quiet,
            "v" => Self::Verbose,
            "vv" => Self::VerboseVerbose,
            _ => Self::Normal,
        }
    }
}
impl From<PrintLevel> for log::LevelFilter {
    fn from(value: PrintLevel) -> Self {
        match value {
            PrintLevel::QuietQuiet => log::LevelFilter::Off,
            PrintLevel::Quiet => log::LevelFilter::Error,
            PrintLevel::Normal => log::LevelFilter::Info,
            PrintLevel::Verbose => log::LevelFilter::Debug,
            PrintLevel::VerboseVerbose => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(PrintLevel::from(-3i8), PrintLevel::QuietQuiet);
        assert_eq!(PrintLevel::from(1i8), PrintLevel::Verbose);
        assert_eq!(PrintLevel::from("vv"), PrintLevel::VerboseVerbose);
        assert_eq!(PrintLevel::from("what"), PrintLevel::Normal);
        assert_eq!(log::LevelFilter::from(PrintLevel::Quiet), log::LevelFilter::Error);
    }
}
