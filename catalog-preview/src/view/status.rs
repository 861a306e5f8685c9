//! The single user-visible status line.

use std::sync::Arc;

use super::tree::ViewTree;

/// Writes status text into the element with the configured id.
///
/// Every write is best-effort: a missing element or a failed mutation is
/// logged at debug level and otherwise ignored.
#[derive(Clone)]
pub struct StatusSurface {
    tree: Arc<dyn ViewTree>,
    element_id: String,
}

impl std::fmt::Debug for StatusSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSurface")
            .field("element_id", &self.element_id)
            .finish_non_exhaustive()
    }
}

impl StatusSurface {
    /// Creates a status surface bound to an element id.
    #[must_use]
    pub fn new(tree: Arc<dyn ViewTree>, element_id: impl Into<String>) -> Self {
        Self {
            tree,
            element_id: element_id.into(),
        }
    }

    /// Replaces the status text. Returns whether the surface was present.
    pub fn set(&self, message: &str) -> bool {
        let Some(node) = self.tree.find_by_id(&self.element_id) else {
            tracing::debug!(element_id = %self.element_id, "Status surface absent");
            return false;
        };
        match self.tree.set_text(node, message) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(error = %err, "Status update failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryViewTree;

    #[test]
    fn test_set_status() {
        let tree = Arc::new(MemoryViewTree::document("status", "product-container"));
        let status = StatusSurface::new(tree.clone(), "status");

        assert!(status.set("Products loaded."));
        assert_eq!(tree.text_by_id("status").as_deref(), Some("Products loaded."));
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let tree = Arc::new(MemoryViewTree::new());
        let status = StatusSurface::new(tree, "status");
        assert!(!status.set("ignored"));
    }
}
