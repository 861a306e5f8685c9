//! Log sink trait and implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Informational output, e.g. product names.
    Info,
    /// Something was missing but the run continued.
    Warn,
    /// A failure routed through the error reporter.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One diagnostic entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Short tag, e.g. "An error occurred".
    pub tag: Option<String>,
    /// The logged message.
    pub message: String,
    /// Structured context.
    pub data: Option<serde_json::Value>,
    /// Pipeline run that produced the entry.
    pub run_id: Option<String>,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl LogEntry {
    /// Creates an entry at the given level.
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            tag: None,
            message: message.into(),
            data: None,
            run_id: None,
            recorded_at: Utc::now(),
        }
    }

    /// Creates an info entry.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    /// Creates a warning entry.
    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    /// Creates an error entry.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets structured data.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the run id.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Trait for diagnostic sinks.
///
/// Recording must never fail or panic; sinks swallow their own errors.
pub trait LogSink: Send + Sync {
    /// Records one entry.
    fn record(&self, entry: LogEntry);
}

/// A sink that discards all entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogSink;

impl LogSink for NoOpLogSink {
    fn record(&self, _entry: LogEntry) {}
}

/// A sink that forwards entries to the tracing framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    /// Creates a new tracing sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn record(&self, entry: LogEntry) {
        let tag = entry.tag.as_deref().unwrap_or_default();
        let run_id = entry.run_id.as_deref().unwrap_or_default();
        match entry.level {
            LogLevel::Info => info!(tag, run_id, data = ?entry.data, "{}", entry),
            LogLevel::Warn => warn!(tag, run_id, data = ?entry.data, "{}", entry),
            LogLevel::Error => error!(tag, run_id, data = ?entry.data, "{}", entry),
        }
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingLogSink {
    entries: parking_lot::RwLock<Vec<LogEntry>>,
}

impl CollectingLogSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    /// Returns the messages of all entries at `level`, in order.
    #[must_use]
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Returns entries carrying the given tag.
    #[must_use]
    pub fn entries_tagged(&self, tag: &str) -> Vec<LogEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.tag.as_deref() == Some(tag))
            .cloned()
            .collect()
    }

    /// Returns the number of collected entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Clears all collected entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl LogSink for CollectingLogSink {
    fn record(&self, entry: LogEntry) {
        self.entries.write().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink() {
        NoOpLogSink.record(LogEntry::info("ignored"));
    }

    #[test]
    fn test_tracing_sink() {
        let sink = TracingLogSink::new();
        sink.record(LogEntry::info("Widget"));
        sink.record(LogEntry::warn("missing container").with_run_id("run-1"));
        sink.record(
            LogEntry::error("Network error (500)")
                .with_tag("An error occurred")
                .with_data(serde_json::json!({"status": 500})),
        );
    }

    #[test]
    fn test_entry_display() {
        let entry = LogEntry::error("boom").with_tag("An error occurred");
        assert_eq!(entry.to_string(), "An error occurred: boom");
        assert_eq!(LogEntry::info("Lamp").to_string(), "Lamp");
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingLogSink::new();
        assert!(sink.is_empty());

        sink.record(LogEntry::info("first"));
        sink.record(LogEntry::error("second").with_tag("An error occurred"));
        sink.record(LogEntry::info("third"));

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.messages_at(LogLevel::Info), vec!["first", "third"]);
        assert_eq!(sink.entries_tagged("An error occurred").len(), 1);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_level_serialize() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), r#""warn""#);
        assert_eq!(LogLevel::Error.to_string(), "error");
    }
}
