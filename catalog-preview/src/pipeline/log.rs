//! The eager pass that logs every product name without rendering.

use tracing::Instrument;

use super::boundary::{guarded, new_run_id};
use super::context::PreviewContext;
use super::state::PipelineState;
use crate::catalog::{CatalogRecord, FetchOutcome};
use crate::errors::CatalogError;
use crate::events::LogEntry;

/// Tag of the pipeline-specific entry written before an error is reported.
pub const FETCH_ERROR_TAG: &str = "Fetch error (log)";

/// Result of one log pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRunOutcome {
    /// Identifier of the run.
    pub run_id: String,
    /// Final state.
    pub state: PipelineState,
    /// The fetched payload or the reported error.
    pub outcome: FetchOutcome,
}

/// Fetches the catalog and logs each record's name.
///
/// The product container is never touched; only the status line is
/// updated.
#[derive(Debug, Clone)]
pub struct FetchLogPipeline {
    ctx: PreviewContext,
}

impl FetchLogPipeline {
    /// Creates the pipeline.
    #[must_use]
    pub fn new(ctx: PreviewContext) -> Self {
        Self { ctx }
    }

    /// Runs the pipeline once. Never fails; errors are reported and
    /// returned inside the outcome.
    pub async fn run(&self) -> LogRunOutcome {
        let run_id = new_run_id();
        let span = tracing::info_span!("fetch_log", run_id = %run_id);
        self.run_inner(run_id).instrument(span).await
    }

    async fn run_inner(&self, run_id: String) -> LogRunOutcome {
        let status = self.ctx.status();
        let messages = &self.ctx.config().messages;

        let mut state = PipelineState::Idle.advance(PipelineState::Loading);
        status.set(&messages.log_loading);

        let outcome = match guarded(self.fetch_and_log(&run_id)).await {
            Ok(records) => {
                state = state.advance(PipelineState::LoggedSuccess);
                status.set(&messages.log_loaded);
                FetchOutcome::Success(records)
            }
            Err(err) => {
                state = state.advance(PipelineState::Failed);
                self.ctx.sink().record(
                    LogEntry::error(err.to_string())
                        .with_tag(FETCH_ERROR_TAG)
                        .with_run_id(run_id.as_str()),
                );
                self.ctx.reporter().report_for_run(&err, Some(&run_id));
                FetchOutcome::Failure(err)
            }
        };

        LogRunOutcome {
            run_id,
            state,
            outcome,
        }
    }

    async fn fetch_and_log(&self, run_id: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
        let response = self
            .ctx
            .fetcher()
            .fetch(&self.ctx.config().endpoint)
            .await?
            .error_for_status()?;

        // Decoding is a suspension point like the request itself.
        tokio::task::yield_now().await;
        let records = response.records_or_empty();

        for (index, record) in records.iter().enumerate() {
            self.ctx
                .sink()
                .record(LogEntry::info(record.log_name(index)).with_run_id(run_id));
        }
        tracing::debug!(count = records.len(), "Logged catalog names");

        Ok(records)
    }
}
