//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, and DefaultLogger.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::sync::Mutex;
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "galaxy3d::Clusterer".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Warn.label().trim(), "WARN");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_creation_with_file_line() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "galaxy3d::ThreadPool".to_string(),
        message: "Failed to build worker pool".to_string(),
        file: Some("thread_pool.rs"),
        line: Some(42),
    };

    let cloned = entry.clone();
    assert_eq!(cloned.severity, LogSeverity::Error);
    assert_eq!(cloned.source, "galaxy3d::ThreadPool");
    assert_eq!(cloned.file, Some("thread_pool.rs"));
    assert_eq!(cloned.line, Some(42));
}

#[test]
fn test_log_entry_debug() {
    let debug_str = format!("{:?}", entry(LogSeverity::Debug, "rebuilding planes"));
    assert!(debug_str.contains("Debug"));
    assert!(debug_str.contains("rebuilding planes"));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_filters_below_info() {
    let logger = DefaultLogger::new();
    assert_eq!(logger.min_severity(), LogSeverity::Info);
    assert!(!logger.accepts(LogSeverity::Trace));
    assert!(!logger.accepts(LogSeverity::Debug));
    assert!(logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_with_min_severity() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);
    assert!(logger.accepts(LogSeverity::Trace));

    let quiet = DefaultLogger::with_min_severity(LogSeverity::Error);
    assert!(!quiet.accepts(LogSeverity::Warn));
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);

    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Just verify it doesn't panic
        logger.log(&entry(severity, "message"));
    }

    let mut detailed = entry(LogSeverity::Error, "with location");
    detailed.file = Some("clusterer.rs");
    detailed.line = Some(7);
    logger.log(&detailed);
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    logged_count: Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.logged_count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_implementation() {
    let logger = CountingLogger { logged_count: Mutex::new(0) };

    logger.log(&entry(LogSeverity::Info, "one"));
    logger.log(&entry(LogSeverity::Trace, "two"));

    assert_eq!(*logger.logged_count.lock().unwrap(), 2);
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}
