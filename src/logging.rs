#![cfg(feature = "std")]

use std::env;
use std::io::Write;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV: &str = "SEABATTLE_LOG";

/// Writes to stderr so stdout stays free for the board and the sim report.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = record.target().trim_start_matches("seabattle::");
        let _ = writeln!(
            std::io::stderr().lock(),
            "{:<5} [{}] {}",
            record.level(),
            target,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn parse_level(value: Option<&str>, default: LevelFilter) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(default)
}

/// Install the stderr logger at the level named by `SEABATTLE_LOG`, or
/// `info` when unset or invalid.
pub fn init_logging() {
    init_logging_with_default(LevelFilter::Info);
}

/// Same as [`init_logging`] with a caller-chosen fallback level. Calling it
/// again after a logger is installed has no effect.
pub fn init_logging_with_default(default: LevelFilter) {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref(), default);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
