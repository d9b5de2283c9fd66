use std::io::Write as _;
use std::sync::OnceLock;

use env_filter::{Builder as LogEnvBuilder, Filter as LogEnvFilter};

use super::PrintLevel;

static LOG_FILTER: OnceLock<LogEnvFilter> = OnceLock::new();
static PRINT_LEVEL: OnceLock<PrintLevel> = OnceLock::new();

/// Shorthand to quickly setup logging. Can be useful in tests.
///
/// `qq`, `q`, `v` and `vv` inputs map to corresponding print levels. Other inputs
/// are mapped to default level
pub fn log_init(lv: &str) {
    init_print_options(lv.into());
}

/// Set global print options. This is usually called from clap args.
///
/// When `RUST_LOG` is set, messages are filtered by it (like `env_logger`),
/// and the more verbose of the two decides the max level.
/// Messages go to stderr, so they don't interfere with a terminal title
/// written to stdout.
pub fn init_print_options(level: PrintLevel) {
    // not using log macros, since we are before log initialization
    let log_level = match std::env::var("RUST_LOG") {
        Ok(value) if !value.is_empty() => {
            let mut builder = LogEnvBuilder::new();
            let filter = builder.parse(&value).build();
            let log_level = filter.filter();
            let _ = LOG_FILTER.set(filter);
            log_level.max(level.into())
        }
        _ => level.into(),
    };
    log::set_max_level(log_level);
    let _ = PRINT_LEVEL.set(level);

    struct LogImpl;
    impl log::Log for LogImpl {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            match LOG_FILTER.get() {
                Some(filter) => filter.enabled(metadata),
                None => {
                    let level = PRINT_LEVEL.get().copied().unwrap_or(PrintLevel::Normal);
                    metadata.level() <= log::LevelFilter::from(level)
                }
            }
        }

        fn log(&self, record: &log::Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let prefix = match record.level() {
                log::Level::Error => 'E',
                log::Level::Warn => 'W',
                log::Level::Info => 'I',
                log::Level::Debug => 'D',
                log::Level::Trace => 'T',
            };
            let mut stderr = std::io::stderr().lock();
            for line in record.args().to_string().lines() {
                let _ = writeln!(stderr, "{prefix}] {line}");
            }
        }

        fn flush(&self) {
            let _ = std::io::stderr().flush();
        }
    }

    let _ = log::set_logger(&LogImpl);
}
