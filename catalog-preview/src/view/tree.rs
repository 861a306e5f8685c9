//! The view-tree capability consumed by the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::errors::CatalogError;

/// Handle to an element in a view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Errors raised by view-tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The handle does not refer to an element of this tree.
    #[error("Unknown view node: {0}")]
    UnknownNode(NodeId),

    /// The append would make an element its own ancestor.
    #[error("Cannot append {child} under its own descendant {parent}")]
    Cycle {
        /// The intended parent.
        parent: NodeId,
        /// The child being appended.
        child: NodeId,
    },
}

impl From<ViewError> for CatalogError {
    fn from(err: ViewError) -> Self {
        Self::Unknown(err.to_string())
    }
}

/// Description of an element to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Tag name, e.g. `article`.
    pub tag: String,
    /// Class list as a single string.
    pub class: Option<String>,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Text content.
    pub text: Option<String>,
}

impl ElementSpec {
    /// Creates a spec for a tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Sets the class. Empty classes are ignored.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.class = Some(class);
        }
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A mutable document tree.
///
/// Implementations use interior mutability so a tree can be shared between
/// the pipelines that write to disjoint parts of it.
pub trait ViewTree: Send + Sync {
    /// Finds an attached element by its `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<NodeId>;

    /// Creates a detached element.
    fn create_element(&self, spec: ElementSpec) -> NodeId;

    /// Removes all children of an element.
    fn clear_children(&self, node: NodeId) -> Result<(), ViewError> {
        self.replace_children(node, &[])
    }

    /// Replaces all children of an element with `children`, in order.
    ///
    /// The replacement is a single step: concurrent callers never observe a
    /// mix of old and new children.
    fn replace_children(&self, parent: NodeId, children: &[NodeId]) -> Result<(), ViewError>;

    /// Appends a child, detaching it from any previous parent.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), ViewError>;

    /// Replaces the text content of an element.
    fn set_text(&self, node: NodeId, text: &str) -> Result<(), ViewError>;
}
