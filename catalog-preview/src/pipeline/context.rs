//! Collaborators shared by the pipelines of one preview.

use std::sync::Arc;

use crate::catalog::{CatalogFetcher, FieldNormalizer};
use crate::config::CatalogConfig;
use crate::events::LogSink;
use crate::render::Renderer;
use crate::report::ErrorReporter;
use crate::view::{StatusSurface, ViewTree};

/// The capabilities a pipeline runs against.
///
/// Cloning is cheap; every collaborator is reference counted.
#[derive(Clone)]
pub struct PreviewContext {
    fetcher: Arc<dyn CatalogFetcher>,
    tree: Arc<dyn ViewTree>,
    sink: Arc<dyn LogSink>,
    config: Arc<CatalogConfig>,
}

impl std::fmt::Debug for PreviewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PreviewContext {
    /// Creates a context.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn CatalogFetcher>,
        tree: Arc<dyn ViewTree>,
        sink: Arc<dyn LogSink>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            fetcher,
            tree,
            sink,
            config: Arc::new(config),
        }
    }

    /// The HTTP capability.
    #[must_use]
    pub fn fetcher(&self) -> &dyn CatalogFetcher {
        self.fetcher.as_ref()
    }

    /// The diagnostic sink.
    #[must_use]
    pub fn sink(&self) -> &dyn LogSink {
        self.sink.as_ref()
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The status line.
    #[must_use]
    pub fn status(&self) -> StatusSurface {
        StatusSurface::new(self.tree.clone(), self.config.ids.status.as_str())
    }

    /// An error reporter bound to this context's sink and status line.
    #[must_use]
    pub fn reporter(&self) -> ErrorReporter {
        ErrorReporter::new(self.sink.clone(), self.status())
    }

    /// A renderer bound to this context's view.
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.tree.clone(), self.sink.clone(), &self.config)
    }

    /// A normalizer using the configured fallback image.
    #[must_use]
    pub fn normalizer(&self) -> FieldNormalizer {
        FieldNormalizer::new(self.config.fallback_image.as_str())
    }
}
