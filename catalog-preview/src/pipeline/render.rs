//! The pass that normalizes and renders the catalog preview.

use tracing::Instrument;

use super::boundary::{guarded, new_run_id};
use super::context::PreviewContext;
use super::state::PipelineState;
use crate::catalog::{CatalogRecord, FetchOutcome};
use crate::errors::CatalogError;

/// Result of one render pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRunOutcome {
    /// Identifier of the run.
    pub run_id: String,
    /// Final state.
    pub state: PipelineState,
    /// The fetched payload or the reported error.
    pub outcome: FetchOutcome,
    /// Number of cards rendered.
    pub rendered: usize,
}

/// Fetches the catalog and renders its first records as cards.
#[derive(Debug, Clone)]
pub struct FetchRenderPipeline {
    ctx: PreviewContext,
}

impl FetchRenderPipeline {
    /// Creates the pipeline.
    #[must_use]
    pub fn new(ctx: PreviewContext) -> Self {
        Self { ctx }
    }

    /// Runs the pipeline once. Never fails; errors are reported and
    /// returned inside the outcome.
    pub async fn run(&self) -> RenderRunOutcome {
        let run_id = new_run_id();
        let span = tracing::info_span!("fetch_render", run_id = %run_id);
        self.run_inner(run_id).instrument(span).await
    }

    async fn run_inner(&self, run_id: String) -> RenderRunOutcome {
        let mut state = PipelineState::Idle.advance(PipelineState::Loading);

        match guarded(self.fetch_and_render()).await {
            Ok((records, rendered)) => {
                state = state.advance(PipelineState::Rendered);
                tracing::info!(rendered, total = records.len(), "Rendered catalog preview");
                RenderRunOutcome {
                    run_id,
                    state,
                    outcome: FetchOutcome::Success(records),
                    rendered,
                }
            }
            Err(err) => {
                state = state.advance(PipelineState::Failed);
                if let Err(clear_err) = self.ctx.renderer().clear() {
                    tracing::debug!(error = %clear_err, "Could not clear container after failure");
                }
                self.ctx.reporter().report_for_run(&err, Some(&run_id));
                RenderRunOutcome {
                    run_id,
                    state,
                    outcome: FetchOutcome::Failure(err),
                    rendered: 0,
                }
            }
        }
    }

    async fn fetch_and_render(&self) -> Result<(Vec<CatalogRecord>, usize), CatalogError> {
        let config = self.ctx.config();
        let renderer = self.ctx.renderer();

        self.ctx.status().set(&config.messages.render_loading);
        if config.show_skeletons {
            renderer.show_skeletons(config.skeleton_count)?;
        }

        let response = self
            .ctx
            .fetcher()
            .fetch(&config.endpoint)
            .await?
            .error_for_status()?;

        // Decoding is a suspension point like the request itself.
        tokio::task::yield_now().await;
        let records = response.records_or_empty();

        let items = self
            .ctx
            .normalizer()
            .normalize_preview(&records, config.preview_limit);
        let rendered = renderer.render(&items)?;

        Ok((records, rendered))
    }
}
