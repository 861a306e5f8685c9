//! Diagnostic log sinks.
//!
//! Pipelines write product names, warnings, and reported errors to a
//! [`LogSink`] that is passed in explicitly rather than read from a global.

mod sink;

pub use sink::{CollectingLogSink, LogEntry, LogLevel, LogSink, NoOpLogSink, TracingLogSink};
