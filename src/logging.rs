//! Minimal `log` backend writing to stderr.

use std::env;
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the level: `off`, `error` .. `trace`.
pub const LOG_ENV: &str = "SUBFLEET_LOG";

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let module = record.target().rsplit("::").next().unwrap_or(record.target());
        eprintln!("{:<5} [{}] {}", record.level(), module, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn level_from_env() -> LevelFilter {
    env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger, level from `SUBFLEET_LOG` (default `info`).
/// Only the first call has an effect.
pub fn init_logging() {
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level: level_from_env(),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
