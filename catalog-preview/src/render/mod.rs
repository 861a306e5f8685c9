//! Rendering display items into the product container.

mod card;

pub use card::{build_card, build_skeleton, CARD_CLASS};

use std::sync::Arc;

use crate::catalog::DisplayItem;
use crate::config::{CatalogConfig, StatusMessages};
use crate::events::{LogEntry, LogSink};
use crate::view::{NodeId, StatusSurface, ViewError, ViewTree};

/// Renders product cards into the container element.
///
/// Every render clears the container first, so rendering the same items
/// twice leaves the same view.
#[derive(Clone)]
pub struct Renderer {
    tree: Arc<dyn ViewTree>,
    status: StatusSurface,
    sink: Arc<dyn LogSink>,
    container_id: String,
    limit: usize,
    empty_message: String,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("container_id", &self.container_id)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Creates a renderer for the container and status ids in `config`.
    #[must_use]
    pub fn new(tree: Arc<dyn ViewTree>, sink: Arc<dyn LogSink>, config: &CatalogConfig) -> Self {
        Self {
            status: StatusSurface::new(tree.clone(), config.ids.status.as_str()),
            tree,
            sink,
            container_id: config.ids.container.clone(),
            limit: config.preview_limit,
            empty_message: config.messages.empty.clone(),
        }
    }

    fn container(&self) -> Option<NodeId> {
        self.tree.find_by_id(&self.container_id)
    }

    /// Replaces the container's content with cards for `items`.
    ///
    /// At most the configured limit is rendered. Returns the number of cards
    /// appended; zero when the container is missing or `items` is empty.
    pub fn render(&self, items: &[DisplayItem]) -> Result<usize, ViewError> {
        let Some(container) = self.container() else {
            self.sink.record(
                LogEntry::warn(format!("#{} not found in view", self.container_id))
                    .with_data(serde_json::json!({ "items": items.len() })),
            );
            return Ok(0);
        };

        // Cards are built detached and swapped in together, so concurrent
        // renders never interleave their cards.
        let cards = items
            .iter()
            .take(self.limit)
            .map(|item| build_card(self.tree.as_ref(), item))
            .collect::<Result<Vec<_>, _>>()?;
        self.tree.replace_children(container, &cards)?;

        if cards.is_empty() {
            self.status.set(&self.empty_message);
        } else {
            self.status.set(&StatusMessages::showing(cards.len()));
        }
        Ok(cards.len())
    }

    /// Replaces the container's content with `count` placeholder cards.
    pub fn show_skeletons(&self, count: usize) -> Result<usize, ViewError> {
        let Some(container) = self.container() else {
            return Ok(0);
        };
        let skeletons = (0..count)
            .map(|_| build_skeleton(self.tree.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.tree.replace_children(container, &skeletons)?;
        Ok(count)
    }

    /// Removes everything from the container.
    pub fn clear(&self) -> Result<(), ViewError> {
        match self.container() {
            Some(container) => self.tree.clear_children(container),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CollectingLogSink, LogLevel};
    use crate::view::MemoryViewTree;
    use pretty_assertions::assert_eq;

    fn setup() -> (Renderer, Arc<MemoryViewTree>, Arc<CollectingLogSink>) {
        let tree = Arc::new(MemoryViewTree::document("status", "product-container"));
        let sink = Arc::new(CollectingLogSink::new());
        let renderer = Renderer::new(tree.clone(), sink.clone(), &CatalogConfig::default());
        (renderer, tree, sink)
    }

    fn titles(tree: &MemoryViewTree) -> Vec<String> {
        tree.descendants_with_class(tree.root(), "product-title")
            .into_iter()
            .filter_map(|t| t.text)
            .collect()
    }

    fn items(n: usize) -> Vec<DisplayItem> {
        (1..=n)
            .map(|i| DisplayItem::new(format!("Item {i}"), 100, "x.png"))
            .collect()
    }

    #[test]
    fn test_render_items_in_order() {
        let (renderer, tree, _) = setup();
        assert_eq!(renderer.render(&items(3)).unwrap(), 3);
        assert_eq!(titles(&tree), vec!["Item 1", "Item 2", "Item 3"]);
        assert_eq!(tree.text_by_id("status").as_deref(), Some("Showing 3 product(s)."));
    }

    #[test]
    fn test_render_caps_at_limit() {
        let (renderer, tree, _) = setup();
        assert_eq!(renderer.render(&items(8)).unwrap(), 5);
        assert_eq!(titles(&tree).len(), 5);
        assert_eq!(tree.text_by_id("status").as_deref(), Some("Showing 5 product(s)."));
    }

    #[test]
    fn test_render_empty() {
        let (renderer, tree, _) = setup();
        renderer.render(&items(2)).unwrap();
        assert_eq!(renderer.render(&[]).unwrap(), 0);

        let container = tree.find_by_id("product-container").unwrap();
        assert!(tree.children(container).is_empty());
        assert_eq!(tree.text_by_id("status").as_deref(), Some("No products to display."));
    }

    #[test]
    fn test_render_is_idempotent() {
        let (renderer, tree, _) = setup();
        renderer.render(&items(4)).unwrap();
        let first = tree.to_html();
        renderer.render(&items(4)).unwrap();
        assert_eq!(tree.to_html(), first);
    }

    #[test]
    fn test_repeated_renders_reuse_released_cards() {
        let (renderer, tree, _) = setup();
        renderer.render(&items(5)).unwrap();
        renderer.show_skeletons(5).unwrap();
        renderer.render(&items(5)).unwrap();
        let steady = tree.capacity();

        for _ in 0..10 {
            renderer.show_skeletons(5).unwrap();
            renderer.render(&items(5)).unwrap();
        }

        assert_eq!(tree.capacity(), steady);
        assert_eq!(titles(&tree).len(), 5);
    }

    #[test]
    fn test_concurrent_renders_never_mix_cards() {
        let (renderer, tree, _) = setup();
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let renderer = renderer.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        renderer.render(&items(5 - n % 2)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let count = tree.descendants_with_class(tree.root(), CARD_CLASS).len();
        assert!(count == 4 || count == 5, "unexpected card count {count}");
    }

    #[test]
    fn test_missing_container_warns() {
        let tree = Arc::new(MemoryViewTree::new());
        let sink = Arc::new(CollectingLogSink::new());
        let renderer = Renderer::new(tree, sink.clone(), &CatalogConfig::default());

        assert_eq!(renderer.render(&items(2)).unwrap(), 0);
        assert_eq!(
            sink.messages_at(LogLevel::Warn),
            vec!["#product-container not found in view"]
        );
    }

    #[test]
    fn test_skeletons_replaced_by_render() {
        let (renderer, tree, _) = setup();
        assert_eq!(renderer.show_skeletons(5).unwrap(), 5);
        assert_eq!(tree.descendants_with_class(tree.root(), CARD_CLASS).len(), 5);

        renderer.render(&items(2)).unwrap();
        assert_eq!(tree.descendants_with_class(tree.root(), CARD_CLASS).len(), 2);
        assert!(tree.descendants_with_class(tree.root(), "skeleton").is_empty());
    }

    #[test]
    fn test_clear() {
        let (renderer, tree, _) = setup();
        renderer.show_skeletons(2).unwrap();
        renderer.clear().unwrap();
        assert!(tree.descendants_with_class(tree.root(), CARD_CLASS).is_empty());
    }
}
