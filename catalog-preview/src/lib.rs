//! # Catalog Preview
//!
//! Fetches a product catalog from a remote endpoint and renders a bounded
//! preview of it into a document view.
//!
//! The crate provides:
//!
//! - **Lenient catalog models**: untrusted records are read field by field,
//!   never rejected
//! - **Field normalization**: every display item is fully populated with
//!   defaults for missing data
//! - **Two fetch pipelines**: an eager pass that logs product names and a
//!   render pass that draws the first products as cards
//! - **One error path**: every failure is logged and shown on the status line
//! - **Injected capabilities**: HTTP transport, view tree, and log sink are
//!   passed in, so everything runs against in-memory fakes in tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_preview::prelude::*;
//! use std::sync::Arc;
//!
//! let config = CatalogConfig::default();
//! let tree = Arc::new(MemoryViewTree::document(&config.ids.status, &config.ids.container));
//! let ctx = PreviewContext::new(
//!     Arc::new(HttpFetcher::new()?),
//!     tree.clone(),
//!     Arc::new(TracingLogSink::new()),
//!     config,
//! );
//!
//! let report = Orchestrator::new(ctx).start().await;
//! println!("{}", tree.to_html());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod catalog;
pub mod config;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod testing;
pub mod view;

/// Prelude module for convenient imports
pub mod prelude {
    #[cfg(feature = "http")]
    pub use crate::catalog::HttpFetcher;
    pub use crate::catalog::{
        CatalogFetcher, CatalogRecord, DisplayItem, FetchOutcome, FetchResponse, FieldNormalizer,
    };
    pub use crate::config::{CatalogConfig, StatusMessages, ViewIds};
    pub use crate::errors::CatalogError;
    pub use crate::events::{CollectingLogSink, LogEntry, LogLevel, LogSink, TracingLogSink};
    pub use crate::pipeline::{
        FetchLogPipeline, FetchRenderPipeline, LogRunOutcome, Orchestrator, PipelineState,
        PreviewContext, RenderRunOutcome, StartupReport,
    };
    pub use crate::render::Renderer;
    pub use crate::report::ErrorReporter;
    pub use crate::view::{ElementSpec, MemoryViewTree, NodeId, StatusSurface, ViewTree};
}
