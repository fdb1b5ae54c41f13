//! Logger backend writing to standard error.

use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Process-wide logger instance.
static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Logger printing one line per record to standard error.
#[derive(Debug)]
struct StderrLogger {
    /// Most detailed level that is printed.
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{:>5} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Installs the standard error logger at the given level.
///
/// The first call wins: later calls leave the installed logger in place and fail.
///
/// # Errors
///
/// This function returns [`SetLoggerError`] if a logger has already been installed.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(LOGGER.get_or_init(|| StderrLogger { level }))?;
    log::set_max_level(level);

    Ok(())
}
