use std::{
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger with the given minimum level. Can only succeed once per process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Changes the level of an already installed logger.
pub fn set_level(level: LevelFilter) {
    get_logger().set_min_level(level);
    log::set_max_level(level);
}

/// Writes log records to stderr, so they never end up inside the printed maze.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(|err| err.into_inner())
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(|err| err.into_inner()) = level;
    }

    pub fn format(record: &Record) -> String {
        format!(
            "{:>5} [{}] {}",
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
