//! An in-memory view tree.

use parking_lot::RwLock;
use std::fmt::Write as _;

use super::tree::{ElementSpec, NodeId, ViewError, ViewTree};

#[derive(Debug, Clone)]
struct Node {
    spec: ElementSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A read-only copy of one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// The element's handle.
    pub id: NodeId,
    /// Tag name.
    pub tag: String,
    /// Class string.
    pub class: Option<String>,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// Text content.
    pub text: Option<String>,
    /// Child handles in order.
    pub children: Vec<NodeId>,
}

impl ElementSnapshot {
    /// Returns an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|part| part == class))
    }
}

/// A [`ViewTree`] held in memory, rooted at a `body` element.
///
/// Elements live in an arena. Children removed by a clear or a replacement
/// are released together with their subtrees, and their slots are reused by
/// later elements, so repeated renders do not grow the arena. Handles to
/// released elements must not be kept.
#[derive(Debug)]
pub struct MemoryViewTree {
    arena: RwLock<Arena>,
}

#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
}

impl Arena {
    fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    fn insert(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.0] = Some(node);
            return id;
        }
        self.slots.push(Some(node));
        NodeId(self.slots.len() - 1)
    }

    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots.get_mut(current.0).and_then(Option::take) {
                stack.extend(node.children);
                self.free.push(current);
            }
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        let old_parent = self.get_mut(child).and_then(|n| n.parent.take());
        if let Some(parent) = old_parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != child);
        }
    }
}

impl Default for MemoryViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryViewTree {
    /// Creates a tree containing only the root.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::default();
        arena.insert(Node {
            spec: ElementSpec::new("body"),
            parent: None,
            children: Vec::new(),
        });
        Self {
            arena: RwLock::new(arena),
        }
    }

    /// Creates the preview page: a status line and an empty product list.
    #[must_use]
    pub fn document(status_id: &str, container_id: &str) -> Self {
        let tree = Self::new();
        let status = tree.create_element(
            ElementSpec::new("p")
                .class("status")
                .attr("id", status_id)
                .attr("aria-live", "polite"),
        );
        let container = tree.create_element(
            ElementSpec::new("section")
                .class("product-grid")
                .attr("id", container_id)
                .attr("role", "list"),
        );
        // Both handles were just created, so this cannot fail.
        let _ = tree.replace_children(tree.root(), &[status, container]);
        tree
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of arena slots, live or released.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.arena.read().slots.len()
    }

    /// Returns a snapshot of an element.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<ElementSnapshot> {
        let arena = self.arena.read();
        arena.get(node).map(|n| ElementSnapshot {
            id: node,
            tag: n.spec.tag.clone(),
            class: n.spec.class.clone(),
            attributes: n.spec.attributes.clone(),
            text: n.spec.text.clone(),
            children: n.children.clone(),
        })
    }

    /// Returns the children of an element.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arena
            .read()
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Returns the text content of an element.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<String> {
        self.arena.read().get(node).and_then(|n| n.spec.text.clone())
    }

    /// Returns the text of the element with the given `id` attribute.
    #[must_use]
    pub fn text_by_id(&self, id: &str) -> Option<String> {
        self.find_by_id(id).and_then(|node| self.text(node))
    }

    /// Returns attached descendants of `node` (excluding itself) carrying `class`,
    /// in document order.
    #[must_use]
    pub fn descendants_with_class(&self, node: NodeId, class: &str) -> Vec<ElementSnapshot> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if let Some(snapshot) = self.element(current) {
                stack.extend(snapshot.children.iter().rev().copied());
                if snapshot.has_class(class) {
                    found.push(snapshot);
                }
            }
        }
        found
    }

    /// Serializes the attached tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let arena = self.arena.read();
        let mut out = String::new();
        write_node(&arena, self.root(), 0, &mut out);
        out
    }
}

impl ViewTree for MemoryViewTree {
    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let arena = self.arena.read();
        let mut stack = vec![self.root()];
        while let Some(current) = stack.pop() {
            let node = arena.get(current)?;
            if node.spec.attributes.iter().any(|(k, v)| k == "id" && v == id) {
                return Some(current);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    fn create_element(&self, spec: ElementSpec) -> NodeId {
        self.arena.write().insert(Node {
            spec,
            parent: None,
            children: Vec::new(),
        })
    }

    fn replace_children(&self, parent: NodeId, children: &[NodeId]) -> Result<(), ViewError> {
        let mut arena = self.arena.write();
        if !arena.contains(parent) {
            return Err(ViewError::UnknownNode(parent));
        }
        for &child in children {
            if !arena.contains(child) {
                return Err(ViewError::UnknownNode(child));
            }
            if child == self.root() || arena.is_ancestor(child, parent) {
                return Err(ViewError::Cycle { parent, child });
            }
        }

        let mut kept = Vec::with_capacity(children.len());
        for &child in children {
            if !kept.contains(&child) {
                kept.push(child);
            }
        }

        let old = arena
            .get_mut(parent)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for &child in &kept {
            arena.detach(child);
            if let Some(node) = arena.get_mut(child) {
                node.parent = Some(parent);
            }
        }
        for child in old {
            if !kept.contains(&child) {
                arena.release(child);
            }
        }
        if let Some(node) = arena.get_mut(parent) {
            node.children = kept;
        }
        Ok(())
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), ViewError> {
        let mut arena = self.arena.write();
        if !arena.contains(parent) {
            return Err(ViewError::UnknownNode(parent));
        }
        if !arena.contains(child) {
            return Err(ViewError::UnknownNode(child));
        }
        if child == self.root() || arena.is_ancestor(child, parent) {
            return Err(ViewError::Cycle { parent, child });
        }

        arena.detach(child);
        if let Some(node) = arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = arena.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    fn set_text(&self, node: NodeId, text: &str) -> Result<(), ViewError> {
        let mut arena = self.arena.write();
        let n = arena.get_mut(node).ok_or(ViewError::UnknownNode(node))?;
        n.spec.text = Some(text.to_string());
        Ok(())
    }
}

fn write_node(arena: &Arena, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = arena.get(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let tag = &node.spec.tag;

    let _ = write!(out, "{indent}<{tag}");
    if let Some(class) = &node.spec.class {
        let _ = write!(out, " class=\"{}\"", escape(class));
    }
    for (name, value) in &node.spec.attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
    out.push('>');

    if tag == "img" {
        out.push('\n');
        return;
    }
    if let Some(text) = &node.spec.text {
        out.push_str(&escape(text));
    }
    if node.children.is_empty() {
        let _ = writeln!(out, "</{tag}>");
        return;
    }
    out.push('\n');
    for child in &node.children {
        write_node(arena, *child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</{tag}>");
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
