//! Renders the catalog preview into an in-memory page and prints it.

use std::sync::Arc;

use anyhow::Context;
use catalog_preview::observability::{init_tracing, LogFormat};
use catalog_preview::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::Pretty);

    let config = CatalogConfig::default();
    let tree = Arc::new(MemoryViewTree::document(&config.ids.status, &config.ids.container));
    let fetcher = HttpFetcher::new().context("building HTTP client")?;
    let ctx = PreviewContext::new(
        Arc::new(fetcher),
        tree.clone(),
        Arc::new(TracingLogSink::new()),
        config,
    );

    let report = Orchestrator::new(ctx).start().await;
    tracing::info!(state = %report.render.state, rendered = report.render.rendered, "Startup finished");

    // Let the detached log pass finish before printing the page.
    let log = report.join_log().await?;
    tracing::info!(state = %log.state, "Log pipeline finished");

    println!("{}", tree.to_html());
    Ok(())
}
