//! Startup sequencing for the two pipelines.

use tokio::task::JoinHandle;

use super::context::PreviewContext;
use super::log::{FetchLogPipeline, LogRunOutcome};
use super::render::{FetchRenderPipeline, RenderRunOutcome};
use crate::errors::CatalogError;

/// What the startup sequence leaves behind.
#[derive(Debug)]
pub struct StartupReport {
    /// Outcome of the awaited render pipeline.
    pub render: RenderRunOutcome,
    /// Handle to the detached log pipeline. Startup never joins it.
    pub log_task: JoinHandle<LogRunOutcome>,
}

impl StartupReport {
    /// Waits for the detached log pipeline.
    pub async fn join_log(self) -> Result<LogRunOutcome, CatalogError> {
        self.log_task
            .await
            .map_err(|e| CatalogError::Unknown(format!("Log task join error: {e}")))
    }
}

/// Runs both pipelines once when the view is ready.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    ctx: PreviewContext,
}

impl Orchestrator {
    /// Creates an orchestrator.
    #[must_use]
    pub fn new(ctx: PreviewContext) -> Self {
        Self { ctx }
    }

    /// Starts the log pipeline without joining it, then runs the render
    /// pipeline to completion.
    ///
    /// Must be called inside a tokio runtime. The two pipelines share no
    /// state, so their responses may arrive in either order.
    pub async fn start(&self) -> StartupReport {
        let log = FetchLogPipeline::new(self.ctx.clone());
        let log_task = tokio::spawn(async move { log.run().await });
        tracing::debug!("Log pipeline started");

        let render = FetchRenderPipeline::new(self.ctx.clone()).run().await;
        tracing::debug!(state = %render.state, "Render pipeline finished");

        StartupReport { render, log_task }
    }
}
