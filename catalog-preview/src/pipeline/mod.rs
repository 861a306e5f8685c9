//! Fetch pipelines and their startup orchestration.
//!
//! This module provides:
//! - The log pipeline, which logs each product name
//! - The render pipeline, which renders the first products
//! - The orchestrator that starts both on load

mod boundary;
mod context;
mod log;
mod orchestrator;
mod render;
mod state;

pub use boundary::{guarded, new_run_id};
pub use context::PreviewContext;
pub use log::{FetchLogPipeline, LogRunOutcome, FETCH_ERROR_TAG};
pub use orchestrator::{Orchestrator, StartupReport};
pub use render::{FetchRenderPipeline, RenderRunOutcome};
pub use state::PipelineState;
