//! Run logging.
//!
//! Each run owns a [`RunLog`]. Entries go out as `tracing` events right away
//! and the warnings stay in the log so the run report can list them.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
}

/// One line of a run's log, as written to the report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub indent: u8,
}

/// Log of a single run
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.push(LogLevel::Info, msg.into(), 0);
    }

    pub fn info_indent(&mut self, msg: impl Into<String>, indent: u8) {
        self.push(LogLevel::Info, msg.into(), indent);
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.push(LogLevel::Success, msg.into(), 0);
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.push(LogLevel::Warning, msg.into(), 0);
    }

    pub fn warning_indent(&mut self, msg: impl Into<String>, indent: u8) {
        self.push(LogLevel::Warning, msg.into(), indent);
    }

    fn push(&mut self, level: LogLevel, message: String, indent: u8) {
        let pad = "  ".repeat(indent as usize);
        match level {
            LogLevel::Info => tracing::info!("{}{}", pad, message),
            LogLevel::Success => tracing::info!("{}✓ {}", pad, message),
            LogLevel::Warning => tracing::warn!("{}{}", pad, message),
        }
        self.entries.push(LogEntry { level, message, indent });
    }

    /// Warning entries, in the order they were logged
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.level == LogLevel::Warning)
            .cloned()
            .collect()
    }
}

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` wins over `verbose`. Calling this twice is harmless.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_warnings_kept_for_report() {
        let mut log = RunLog::new();
        log.info("reading");
        log.success("indexed");
        log.warning_indent("duplicate team", 1);
        log.warning("unknown competition");

        let warnings = log.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "duplicate team");
        assert_eq!(warnings[0].indent, 1);
        assert_eq!(warnings[1].message, "unknown competition");
    }

    #[test]
    fn test_logs_are_independent() {
        let mut first = RunLog::new();
        let second = RunLog::new();
        first.warning("only in first");

        assert_eq!(first.warnings().len(), 1);
        assert!(second.warnings().is_empty());
    }

    #[test]
    fn test_entry_serializes_lowercase_level() {
        let mut log = RunLog::new();
        log.warning("x");
        let json = serde_json::to_value(&log.warnings()[0]).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["indent"], 0);
    }
}
