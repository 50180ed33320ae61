/// Structured logging for the water-level monitoring service
///
/// Provides context-rich logging with upstream-source tags, station
/// identifiers, timestamps, and severity levels. Supports console output
/// and optional file-based logging for daemon operation.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Upstream sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    /// Live pegelaktuell WFS feed.
    Pegel,
    /// EHYD historical lookup documents.
    Ehyd,
    /// Flood-extent zone documents.
    Zones,
    /// Service internals.
    System,
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::Pegel => write!(f, "PEGEL"),
            LogSource::Ehyd => write!(f, "EHYD"),
            LogSource::Zones => write!(f, "ZONES"),
            LogSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - upstream document temporarily empty or a station
    /// offline for maintenance.
    Expected,
    /// Unexpected failure - indicates service degradation or an API change.
    Unexpected,
    /// Unknown - cannot determine if this is expected or not.
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a refresh-cycle failure based on the error message.
pub fn classify_feed_failure(error_message: &str) -> FailureType {
    // Parse errors suggest an upstream schema change; transport and HTTP
    // errors usually clear on the next tick.
    if error_message.contains("Parse error") {
        FailureType::Unexpected
    } else if error_message.contains("HTTP error") || error_message.contains("Transport error") {
        FailureType::Unknown
    } else {
        FailureType::Unknown
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger { min_level, log_file };
        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: LogSource, station: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let station_part = station.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, station_part, message
        );

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", log_entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", log_entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public logging functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message
pub fn info(source: LogSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, source, station, message);
    }
}

/// Log a warning message
pub fn warn(source: LogSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, source, station, message);
    }
}

/// Log an error message
pub fn error(source: LogSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, source, station, message);
    }
}

/// Log a debug message
pub fn debug(source: LogSource, station: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, source, station, message);
    }
}

/// Log a refresh-cycle failure with automatic classification.
pub fn log_cycle_failure(source: LogSource, operation: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_feed_failure(&error_msg);

    let message = format!("{} failed [{}]: {}", operation, failure_type, error_msg);

    match failure_type {
        FailureType::Expected => debug(source, None, &message),
        FailureType::Unexpected => error(source, None, &message),
        FailureType::Unknown => warn(source, None, &message),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_parse_failures_classify_as_unexpected() {
        let result = classify_feed_failure("Parse error: missing field `features`");
        assert_eq!(result, FailureType::Unexpected);
    }

    #[test]
    fn test_http_failures_classify_as_unknown() {
        let result = classify_feed_failure("HTTP error: 502");
        assert_eq!(result, FailureType::Unknown);
    }
}
