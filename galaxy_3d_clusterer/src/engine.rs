/// Galaxy3D Engine - global services shared by the clusterer
///
/// The clusterer itself is owned by the caller (one per active camera).
/// The only process-wide state is the logger, kept behind a RwLock so
/// worker threads can log while the main thread swaps loggers.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::Error;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

/// Access point for engine-wide services (logging)
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_clusterer::galaxy3d::Engine;
/// use galaxy_3d_clusterer::galaxy3d::log::{DefaultLogger, LogSeverity};
///
/// Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Debug));
/// ```
pub struct Engine;

impl Engine {
    /// Log an error at ERROR severity and hand it back (internal use)
    ///
    /// Every fallible constructor routes its errors through here so that
    /// configuration problems show up in the log with file:line.
    pub(crate) fn log_and_return_error(source: &str, error: Error) -> Error {
        match &error {
            Error::InvalidConfig(msg) => {
                crate::engine_error!(source, "Invalid configuration: {}", msg);
            }
            Error::InitializationFailed(msg) => {
                crate::engine_error!(source, "Initialization failed: {}", msg);
            }
        }
        error
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file logger, test capture, etc.)
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger, Info and above)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Logging entry point for simple logs without file:line
    ///
    /// Used by macros like engine_info!, engine_debug!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Logging entry point with file:line information (for ERROR logs)
    ///
    /// Used by the engine_error! macro to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
