//! End-to-end flows over the public API with an in-memory view.

use std::sync::Arc;

use catalog_preview::prelude::*;
use catalog_preview::report::ERROR_TAG;
use catalog_preview::testing::{
    assert_card_titles, assert_status, card_count, card_images, card_prices, fixtures,
    ScriptedResponse, StaticFetcher,
};
use pretty_assertions::assert_eq;

struct Harness {
    fetcher: Arc<StaticFetcher>,
    tree: Arc<MemoryViewTree>,
    sink: Arc<CollectingLogSink>,
    ctx: PreviewContext,
}

impl Harness {
    fn new(fetcher: StaticFetcher) -> Self {
        Self::with_config(fetcher, CatalogConfig::default().with_endpoint("http://catalog.test/products"))
    }

    fn with_config(fetcher: StaticFetcher, config: CatalogConfig) -> Self {
        let fetcher = Arc::new(fetcher);
        let tree = Arc::new(MemoryViewTree::document(&config.ids.status, &config.ids.container));
        let sink = Arc::new(CollectingLogSink::new());
        let ctx = PreviewContext::new(fetcher.clone(), tree.clone(), sink.clone(), config);
        Self {
            fetcher,
            tree,
            sink,
            ctx,
        }
    }
}

#[tokio::test]
async fn widget_scenario_renders_one_card() {
    let h = Harness::new(StaticFetcher::ok_json(fixtures::widget_payload()));

    let result = FetchRenderPipeline::new(h.ctx.clone()).run().await;

    assert_eq!(result.rendered, 1);
    assert_card_titles(&h.tree, &["Widget"]);
    assert_eq!(card_prices(&h.tree), vec!["$5.00"]);
    assert_eq!(card_images(&h.tree), vec!["x.png"]);
    assert_status(&h.tree, "Showing 1 product(s).");
    assert_eq!(h.fetcher.requested_urls(), vec!["http://catalog.test/products"]);
}

#[tokio::test]
async fn empty_payload_shows_nothing_and_logs_nothing() {
    let h = Harness::new(StaticFetcher::ok_json(serde_json::json!([])));

    let report = Orchestrator::new(h.ctx.clone()).start().await;
    report.join_log().await.unwrap();

    assert_eq!(card_count(&h.tree), 0);
    assert!(h.sink.is_empty());
    FetchRenderPipeline::new(h.ctx.clone()).run().await;
    assert_status(&h.tree, "No products to display.");
}

#[tokio::test]
async fn sparse_records_are_defaulted() {
    let h = Harness::new(StaticFetcher::ok_json(fixtures::sparse_payload()));

    FetchRenderPipeline::new(h.ctx.clone()).run().await;

    assert_card_titles(
        &h.tree,
        &["Unnamed Product", "Unnamed Product", "Unnamed Product", "Priceless", "Unnamed Product"],
    );
    assert_eq!(card_prices(&h.tree), vec!["$0.00"; 5]);
    let fallback = h.ctx.config().fallback_image.clone();
    assert_eq!(card_images(&h.tree), vec![fallback; 5]);
}

#[tokio::test]
async fn empty_image_url_falls_back() {
    let h = Harness::new(StaticFetcher::ok_json(serde_json::json!([
        {"fields": {"name": "A", "image": [{"url": ""}]}}
    ])));

    FetchRenderPipeline::new(h.ctx.clone()).run().await;

    assert_eq!(card_images(&h.tree), vec![h.ctx.config().fallback_image.clone()]);
}

#[tokio::test]
async fn log_pipeline_names_sparse_records_by_position() {
    let h = Harness::new(StaticFetcher::ok_json(fixtures::sparse_payload()));

    FetchLogPipeline::new(h.ctx.clone()).run().await;

    assert_eq!(
        h.sink.messages_at(LogLevel::Info),
        vec!["Product 1", "Product 2", "Product 3", "Priceless", "Product 5", "Sixth"]
    );
    assert_eq!(card_count(&h.tree), 0);
}

#[tokio::test]
async fn not_found_reported_by_each_pipeline() {
    let h = Harness::new(StaticFetcher::status(404));

    let report = Orchestrator::new(h.ctx.clone()).start().await;
    let log = report.join_log().await.unwrap();

    assert_eq!(log.state, PipelineState::Failed);
    let reported = h.sink.entries_tagged(ERROR_TAG);
    assert_eq!(reported.len(), 2);
    assert!(reported.iter().all(|e| e.message.contains("404")));
    assert_eq!(card_count(&h.tree), 0);
}

#[tokio::test]
async fn log_failure_leaves_rendered_cards_alone() {
    let h = Harness::new(StaticFetcher::sequence(vec![
        ScriptedResponse::Respond(FetchResponse::ok_json(&fixtures::numbered_payload(3))),
        ScriptedResponse::Respond(FetchResponse::new(500, "")),
    ]));

    FetchRenderPipeline::new(h.ctx.clone()).run().await;
    let log = FetchLogPipeline::new(h.ctx.clone()).run().await;

    assert_eq!(log.state, PipelineState::Failed);
    assert_card_titles(&h.tree, &["Product 1", "Product 2", "Product 3"]);
    assert_status(&h.tree, "An error occurred: Network error (500)");
}

#[tokio::test]
async fn offline_transport_is_reported_not_raised() {
    let h = Harness::new(StaticFetcher::transport_error("error sending request: dns error"));

    let result = FetchRenderPipeline::new(h.ctx.clone()).run().await;

    assert_eq!(result.state, PipelineState::Failed);
    assert_status(&h.tree, "An error occurred: error sending request: dns error");
    assert_eq!(h.sink.entries_tagged(ERROR_TAG).len(), 1);
}

#[tokio::test]
async fn render_twice_does_not_accumulate() {
    let h = Harness::new(StaticFetcher::ok_json(fixtures::numbered_payload(7)));
    let pipeline = FetchRenderPipeline::new(h.ctx.clone());

    pipeline.run().await;
    let first = h.tree.to_html();
    pipeline.run().await;

    assert_eq!(h.tree.to_html(), first);
    assert_eq!(card_count(&h.tree), 5);
}

#[tokio::test]
async fn custom_limit_and_ids_are_honoured() {
    let mut config = CatalogConfig::default().with_preview_limit(2);
    config.ids.container = "grid".to_string();
    config.ids.status = "banner".to_string();
    let h = Harness::with_config(StaticFetcher::ok_json(fixtures::numbered_payload(4)), config);

    FetchRenderPipeline::new(h.ctx.clone()).run().await;

    assert_eq!(card_count(&h.tree), 2);
    assert_eq!(h.tree.text_by_id("banner").as_deref(), Some("Showing 2 product(s)."));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn pipelines_survive_concurrent_runs() {
    let h = Harness::new(StaticFetcher::ok_json(fixtures::numbered_payload(6)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pipeline = FetchRenderPipeline::new(h.ctx.clone());
            tokio::spawn(async move { pipeline.run().await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().state, PipelineState::Rendered);
    }

    assert_card_titles(
        &h.tree,
        &["Product 1", "Product 2", "Product 3", "Product 4", "Product 5"],
    );
}
