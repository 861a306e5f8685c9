//! The single path through which failures reach the user.

use std::sync::Arc;

use crate::config::StatusMessages;
use crate::errors::CatalogError;
use crate::events::{LogEntry, LogSink};
use crate::view::StatusSurface;

/// Tag attached to every reported error.
pub const ERROR_TAG: &str = "An error occurred";

/// Logs a failure and shows it on the status surface.
#[derive(Clone)]
pub struct ErrorReporter {
    sink: Arc<dyn LogSink>,
    status: StatusSurface,
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl ErrorReporter {
    /// Creates a reporter writing to a sink and a status surface.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>, status: StatusSurface) -> Self {
        Self { sink, status }
    }

    /// Reports an error and returns the message shown to the user.
    pub fn report(&self, error: &CatalogError) -> String {
        self.report_for_run(error, None)
    }

    /// Reports an error raised by a specific pipeline run.
    pub fn report_for_run(&self, error: &CatalogError, run_id: Option<&str>) -> String {
        let message = error.to_string();

        let mut entry = LogEntry::error(message.clone())
            .with_tag(ERROR_TAG)
            .with_data(serde_json::json!(error.to_dict()));
        if let Some(run_id) = run_id {
            entry = entry.with_run_id(run_id);
        }
        self.sink.record(entry);

        self.status.set(&StatusMessages::error(&message));
        message
    }
}
